//! Provider configuration and selection

use crate::{LlmError, MockProvider, OllamaProvider, OpenAiProvider};
use async_trait::async_trait;
use insight_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which backend answers summarization prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Offline deterministic provider, useful for dry runs
    Mock,
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible chat completions endpoint or gateway
    #[serde(alias = "gateway")]
    OpenAi,
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::Ollama
    }
}

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend to use
    pub provider: ProviderKind,

    /// Base URL of the backend
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Bearer token for OpenAI-compatible endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion length limit in tokens
    pub max_tokens: u32,

    /// Attempts per request before giving up
    pub max_attempts: u32,

    /// Per-request HTTP timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            endpoint: crate::ollama::DEFAULT_ENDPOINT.to_string(),
            model: "llama3".to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 1024,
            max_attempts: crate::ollama::DEFAULT_MAX_ATTEMPTS,
            timeout_secs: crate::ollama::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.provider != ProviderKind::Mock && self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Longest one request can take: every attempt timing out, plus the
    /// 1s, 2s, 4s ... backoff between attempts
    pub fn worst_case_request(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        let backoff = (0..attempts - 1).fold(0u64, |total, n| {
            total.saturating_add(2u64.saturating_pow(n))
        });
        self.timeout()
            .checked_mul(attempts)
            .and_then(|requests| requests.checked_add(Duration::from_secs(backoff)))
            .unwrap_or(Duration::MAX)
    }

    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A provider chosen at runtime from [`LlmConfig`]
pub enum AnyProvider {
    /// Mock backend
    Mock(MockProvider),
    /// Ollama backend
    Ollama(OllamaProvider),
    /// OpenAI-compatible backend
    OpenAi(OpenAiProvider),
}

impl AnyProvider {
    /// Build the provider described by `config`
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let provider = match config.provider {
            ProviderKind::Mock => AnyProvider::Mock(MockProvider::new(
                r#"["Mock insight: configure a real provider to summarize papers"]"#,
            )),
            ProviderKind::Ollama => AnyProvider::Ollama(
                OllamaProvider::with_timeout(&config.endpoint, &config.model, config.timeout())?
                    .with_max_attempts(config.max_attempts)
                    .with_sampling(config.temperature, config.max_tokens),
            ),
            ProviderKind::OpenAi => {
                let mut provider =
                    OpenAiProvider::with_timeout(&config.endpoint, &config.model, config.timeout())?
                        .with_max_attempts(config.max_attempts)
                        .with_sampling(config.temperature, config.max_tokens);
                if let Some(key) = &config.api_key {
                    provider = provider.with_api_key(key);
                }
                AnyProvider::OpenAi(provider)
            }
        };

        Ok(provider)
    }
}

#[async_trait]
impl LlmProvider for AnyProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Mock(p) => p.generate(prompt).await,
            AnyProvider::Ollama(p) => p.generate(prompt).await,
            AnyProvider::OpenAi(p) => p.generate(prompt).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            AnyProvider::Mock(p) => p.model_name(),
            AnyProvider::Ollama(p) => p.model_name(),
            AnyProvider::OpenAi(p) => p.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LlmConfig::default().validate().is_ok());
    }

    #[test]
    fn test_worst_case_request() {
        // 3 x 120s plus 1s + 2s of backoff
        assert_eq!(LlmConfig::default().worst_case_request(), Duration::from_secs(363));

        let single = LlmConfig {
            max_attempts: 1,
            timeout_secs: 30,
            ..LlmConfig::default()
        };
        assert_eq!(single.worst_case_request(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = LlmConfig {
            max_attempts: 0,
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let config = LlmConfig {
            temperature: 3.5,
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml_with_gateway_alias() {
        let config: LlmConfig = toml::from_str(
            r#"
            provider = "gateway"
            endpoint = "http://lite_proxy:4000"
            model = "gpt-3.5-turbo-0125"
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_mock_from_config() {
        let config = LlmConfig {
            provider: ProviderKind::Mock,
            ..LlmConfig::default()
        };
        let provider = AnyProvider::from_config(&config).unwrap();
        assert_eq!(provider.model_name(), "mock");
        assert!(provider.generate("anything").await.unwrap().contains("Mock insight"));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = LlmConfig {
            model: String::new(),
            ..LlmConfig::default()
        };
        assert!(matches!(AnyProvider::from_config(&config), Err(LlmError::Config(_))));
    }
}
