//! redocup: local HTTP preview for OpenAPI/Swagger specs, rendered with
//! ReDoc, with optional browser reload on spec file changes.

pub mod error;
pub mod render;
pub mod server;
pub mod spec;
pub mod state;
pub mod watch;

pub use error::RedocupError;
pub use server::{build_router, serve};
pub use state::{AppState, ServerConfig};
pub use watch::serve_proxied;
