//! Paper Insights API
//!
//! Serves the insights markdown file as JSON over HTTP.
//!
//! - `GET /api/insights` returns every parsed section, in file order
//! - `GET /health` reports liveness and whether the file exists
//!
//! The server only reads the file; it never writes to it.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use insight_store::MarkdownStore;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Initialize the tracing subscriber (stderr, `RUST_LOG`, default `info`)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // A subscriber may already be installed by an embedding binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Start the Insights API HTTP server
///
/// Binds to the configured address and serves until the process is
/// stopped or Ctrl+C is received.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Paper Insights API");
    info!("Bind address: {}", config.bind_addr());
    info!("Insights file: {}", config.insights_path.display());

    let state = AppState::new(MarkdownStore::new(config.insights_path.clone()));
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
