//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ingestion error
    #[error("{0}")]
    Ingest(#[from] insight_ingestor::IngestError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] insight_store::StoreError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] insight_llm::LlmError),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(#[from] insight_api::ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
