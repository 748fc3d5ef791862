//! Shared application state for the Axum server.

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// HTML shell, rendered once at startup.
    pub html: Arc<String>,
}

impl AppState {
    pub fn new(config: ServerConfig, html: String) -> Self {
        Self {
            config: Arc::new(config),
            html: Arc::new(html),
        }
    }
}

/// Configuration for the preview server. Built once from CLI input,
/// immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub spec_path: PathBuf,
    pub port: u16,
    pub watch: bool,
}
