//! Axum HTTP server: viewer asset mount, spec endpoint, HTML fallback.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::error::{RedocupError, Result};
use crate::render;
use crate::spec;
use crate::state::{AppState, ServerConfig};

/// The bundled ReDoc viewer assets. `build.rs` guarantees the folder
/// exists even when the real bundle has not been vendored.
#[derive(rust_embed::Embed)]
#[folder = "assets/redoc"]
struct ViewerAssets;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/assets/redoc/{*path}", get(serve_viewer_asset))
        .route("/spec.json", get(serve_spec))
        // Anything else gets the shell, so the viewer owns client routing
        .fallback(serve_shell)
        .with_state(state)
        .layer(cors)
}

/// Start the server on the configured public port.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let html = render::load_html(&config)?;
    let port = config.port;
    let state = AppState::new(config, html);
    serve_on(state, port, true).await
}

/// Bind and run on an explicit port. `announce` controls the listening
/// log line; the watch-mode internal server runs silently.
pub(crate) async fn serve_on(state: AppState, port: u16, announce: bool) -> Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| RedocupError::Bind { port, source })?;
    if announce {
        info!("Server listening on port {}", port);
    }

    axum::serve(listener, app).await.map_err(RedocupError::Server)?;
    Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Load the spec fresh from disk and hand it back as JSON text.
///
/// Failures here are soft: log the cause, return an empty body, keep
/// serving. The watch workflow depends on re-reading per request.
async fn serve_spec(State(state): State<AppState>) -> Response {
    let body = match spec::load_spec(&state.config.spec_path) {
        Ok(json) => json,
        Err(e) => {
            error!("failed to load spec: {}", e);
            String::new()
        }
    };
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn serve_shell(State(state): State<AppState>) -> Html<String> {
    Html(state.html.as_ref().clone())
}

async fn serve_viewer_asset(Path(path): Path<String>) -> Response {
    let Some(content) = ViewerAssets::get(&path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(content.data.into_owned()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
