//! Error types for redocup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedocupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("html template not found in bundle")]
    TemplateMissing,

    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        source: std::io::Error,
    },

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("server error: {0}")]
    Server(std::io::Error),
}

pub type Result<T> = std::result::Result<T, RedocupError>;
