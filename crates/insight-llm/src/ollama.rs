//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API so papers can be
//! summarized without sending them to a hosted service.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama `/api/generate` endpoint
//! - Configurable endpoint, model and sampling options
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use insight_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3").unwrap();
//! ```

use crate::http::{build_client, post_json_with_retry};
use crate::LlmError;
use async_trait::async_trait;
use insight_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds; whole papers are slow to read)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_attempts: u32,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: build_client(timeout)?,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set sampling temperature and the completion length limit
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.max_tokens = Some(max_tokens);
        self
    }

    fn options(&self) -> Option<OllamaOptions> {
        if self.temperature.is_none() && self.max_tokens.is_none() {
            return None;
        }
        Some(OllamaOptions {
            temperature: self.temperature,
            num_predict: self.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if Ollama is not running, the model is not pulled,
    /// the network fails or the response cannot be decoded.
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = format!("{}/api/generate", self.endpoint);
        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: self.options(),
        };

        let response: OllamaGenerateResponse = post_json_with_retry(
            &self.client,
            &url,
            &request_body,
            None,
            &self.model,
            self.max_attempts,
        )
        .await?;

        Ok(response.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama3");
        assert_eq!(provider.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(provider.options().is_none());
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model_name(), "mistral");
    }

    #[test]
    fn test_ollama_request_serialization() {
        let provider = OllamaProvider::default_endpoint("llama3")
            .unwrap()
            .with_sampling(0.2, 512);
        let body = OllamaGenerateRequest {
            model: &provider.model,
            prompt: "hi",
            stream: false,
            options: provider.options(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 512);
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3").unwrap();
        if let Ok(response) = provider.generate("Say 'hello' and nothing else").await {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Nothing listens on port 1
        let provider = OllamaProvider::new("http://127.0.0.1:1", "llama3")
            .unwrap()
            .with_max_attempts(1);

        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
