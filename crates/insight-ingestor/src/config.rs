//! Configuration for the Ingestor and the LLM-backed summarizer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Ingestor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestorConfig {
    /// Directory scanned for papers (non-recursive)
    pub input_dir: PathBuf,

    /// Markdown file the insights are appended to
    pub output_path: PathBuf,

    /// Maximum time for a single summarization call (seconds)
    pub summarize_timeout_secs: u64,
}

impl IngestorConfig {
    /// Get the summarization timeout as a Duration
    pub fn summarize_timeout(&self) -> Duration {
        Duration::from_secs(self.summarize_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("input_dir must not be empty".to_string());
        }
        if self.output_path.as_os_str().is_empty() {
            return Err("output_path must not be empty".to_string());
        }
        if self.summarize_timeout_secs == 0 {
            return Err("summarize_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("papers"),
            output_path: PathBuf::from("docs/research-insights.md"),
            summarize_timeout_secs: 400,
        }
    }
}

/// Configuration for the LLM-backed summarizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Characters of paper text included in the prompt; longer papers are truncated
    pub max_text_chars: usize,

    /// Maximum insights kept per paper
    pub max_insights: usize,
}

impl SummarizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than 0".to_string());
        }
        if self.max_insights == 0 {
            return Err("max_insights must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_text_chars: 24_000,
            max_insights: 5,
        }
    }
}
