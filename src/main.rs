//! redocup CLI: serve API reference documentation with ReDoc.

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use redocup::{serve, serve_proxied, RedocupError, ServerConfig};

#[derive(Parser)]
#[command(
    name = "redocup",
    about = "Simple way to serve OpenAPI/Swagger-generated API reference documentation with ReDoc.",
    version
)]
struct Cli {
    /// Path to the spec file (JSON or YAML)
    spec: PathBuf,

    /// Port on which the server will listen
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Reload the browser when the spec file changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        spec_path: cli.spec,
        port: cli.port,
        watch: cli.watch,
    };

    let result = if config.watch {
        serve_proxied(config).await
    } else {
        serve(config).await
    };

    if let Err(e) = result {
        match &e {
            RedocupError::Template(_) | RedocupError::TemplateMissing => {
                error!("failed to load html template: {}", e)
            }
            RedocupError::Bind { .. } | RedocupError::Server(_) => {
                error!("failed to start server: {}", e)
            }
            _ => error!("{}", e),
        }
        std::process::exit(1);
    }
}
