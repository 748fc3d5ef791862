//! Watch mode: file watcher, reload hub, and the reload proxy.
//!
//! With `--watch` the HTTP server binds `port + 1` and a proxy takes the
//! public port. The proxy forwards all traffic to the internal server,
//! injects a small reload client into HTML responses, and pushes a
//! `reload` event over SSE whenever the watched spec file changes.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response, Sse},
    routing::get,
    Router,
};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::{error, info, warn};

use crate::error::{RedocupError, Result};
use crate::render;
use crate::server;
use crate::state::{AppState, ServerConfig};

const RELOAD_CLIENT: &str = include_str!("../assets/reload-client.js");
const RELOAD_SCRIPT_TAG: &str = "<script src=\"/__reload__.js\"></script>";

/// Debounce window for editor save storms on the watched file.
const DEBOUNCE: Duration = Duration::from_millis(250);

// ─── Reload hub ──────────────────────────────────────────────────────────────

/// Fan-out point for reload signals. Watcher threads send, SSE clients
/// subscribe. Sending with no connected clients is a no-op.
#[derive(Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<()>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

// ─── File watcher ────────────────────────────────────────────────────────────

/// Watch a single file and signal the hub on modify/create events.
///
/// The returned watcher must stay alive for the watch to stay active.
pub fn spawn_watcher(path: &Path, hub: ReloadHub) -> Result<RecommendedWatcher> {
    let mut last_event: Option<Instant> = None;

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            // Editors replace files on save, so creation counts as a change
            if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                return;
            }
            let now = Instant::now();
            if let Some(last) = last_event {
                if now.duration_since(last) < DEBOUNCE {
                    return;
                }
            }
            last_event = Some(now);
            hub.notify();
        }
        Err(e) => warn!("watch error: {}", e),
    })?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

// ─── Proxied mode ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub(crate) struct ProxyState {
    upstream_port: u16,
    client: reqwest::Client,
    hub: ReloadHub,
}

/// Run the server in watch mode: internal server on `port + 1`, reload
/// proxy on the configured public port.
///
/// The `+ 1` convention has no collision detection; it mirrors the
/// documented behavior of the tool this replaces.
pub async fn serve_proxied(config: ServerConfig) -> Result<()> {
    let public_port = config.port;
    let internal_port = config.port + 1;

    let hub = ReloadHub::new();
    let _watcher = spawn_watcher(&config.spec_path, hub.clone())?;

    let html = render::load_html(&config)?;
    let state = AppState::new(config, html);

    // Either bind failure is fatal; the internal server mirrors direct mode
    tokio::try_join!(
        server::serve_on(state, internal_port, false),
        run_proxy(public_port, internal_port, hub),
    )?;
    Ok(())
}

pub(crate) fn build_proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/__reload__", get(reload_events))
        .route("/__reload__.js", get(reload_script))
        .fallback(forward)
        .with_state(state)
}

async fn run_proxy(public_port: u16, upstream_port: u16, hub: ReloadHub) -> Result<()> {
    let state = ProxyState {
        upstream_port,
        client: reqwest::Client::new(),
        hub,
    };
    let app = build_proxy_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], public_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| RedocupError::Bind {
            port: public_port,
            source,
        })?;
    // The one startup line watch mode emits
    info!("Server listening on port {}", public_port);

    axum::serve(listener, app).await.map_err(RedocupError::Server)?;
    Ok(())
}

// ─── Proxy handlers ──────────────────────────────────────────────────────────

/// SSE stream of reload events for connected browsers.
async fn reload_events(
    State(state): State<ProxyState>,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<axum::response::sse::Event, Infallible>>>
{
    let rx = state.hub.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|msg| msg.ok().map(|_| Ok(axum::response::sse::Event::default().data("reload"))));

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn reload_script() -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, "application/javascript")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(RELOAD_CLIENT))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Forward everything else to the internal server, injecting the reload
/// client into HTML responses on the way back.
async fn forward(State(state): State<ProxyState>, req: Request) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| "/".to_owned());
    let url = format!("http://127.0.0.1:{}{}", state.upstream_port, path_and_query);

    let upstream = match state.client.request(req.method().clone(), &url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("proxy request failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let is_html = content_type
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false);

    let bytes = match upstream.bytes().await {
        Ok(b) => b,
        Err(e) => {
            error!("proxy body read failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
        }
    };

    let body = if is_html {
        Body::from(inject_reload_script(&String::from_utf8_lossy(&bytes)))
    } else {
        Body::from(bytes)
    };

    let mut builder = Response::builder().status(status);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}

/// Splice the reload script tag in front of `</body>`, or append when the
/// document has no closing body tag.
fn inject_reload_script(html: &str) -> String {
    match html.rfind("</body>") {
        Some(idx) => format!("{}{}\n{}", &html[..idx], RELOAD_SCRIPT_TAG, &html[idx..]),
        None => format!("{}{}", html, RELOAD_SCRIPT_TAG),
    }
}
