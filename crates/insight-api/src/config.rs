//! Configuration file parsing for the Insights API.
//!
//! Loads the bind address and the location of the insights markdown file
//! from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Markdown file served by `GET /api/insights`
    #[serde(default = "default_insights_path")]
    pub insights_path: PathBuf,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Default port: 3000
fn default_bind_port() -> u16 {
    3000
}

fn default_insights_path() -> PathBuf {
    PathBuf::from("docs/research-insights.md")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            insights_path: default_insights_path(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;

        if config.bind_address.is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if config.insights_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("insights_path".to_string()));
        }

        Ok(config)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
