//! Configuration management for the CLI.

use crate::cli::Overrides;
use crate::error::{CliError, Result};
use insight_api::config::ServerConfig;
use insight_ingestor::{IngestorConfig, SummarizerConfig};
use insight_llm::{BudgetConfig, LlmConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input directory and output file
    #[serde(default)]
    pub ingestor: IngestorConfig,

    /// Prompt size and insight count
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// LLM backend
    #[serde(default)]
    pub llm: LlmConfig,

    /// Daily token budget
    #[serde(default)]
    pub budget: BudgetConfig,

    /// HTTP server for `serve`
    #[serde(default)]
    pub server: ServerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".paper-insights").join("config.toml"))
    }

    /// Resolve the configuration file path, preferring an explicit one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply command-line and environment overrides.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.input_dir {
            self.ingestor.input_dir = dir.clone();
        }
        if let Some(output) = &overrides.output {
            self.ingestor.output_path = output.clone();
            self.server.insights_path = output.clone();
        }
        if let Some(url) = &overrides.gateway_url {
            self.llm.provider = ProviderKind::OpenAi;
            self.llm.endpoint = url.clone();
        }
        if let Some(model) = &overrides.model {
            self.llm.model = model.clone();
        }
        if overrides.mock {
            self.llm.provider = ProviderKind::Mock;
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.ingestor
            .validate()
            .and_then(|_| self.summarizer.validate())
            .and_then(|_| self.llm.validate())
            .map_err(CliError::Config)?;

        if self.llm.provider != ProviderKind::Mock {
            let worst_case = self.llm.worst_case_request();
            if self.ingestor.summarize_timeout() < worst_case {
                return Err(CliError::Config(format!(
                    "summarize_timeout_secs ({}) is shorter than the LLM retry window of {}s \
                     ({} attempts of {}s plus backoff)",
                    self.ingestor.summarize_timeout_secs,
                    worst_case.as_secs(),
                    self.llm.max_attempts,
                    self.llm.timeout_secs
                )));
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
