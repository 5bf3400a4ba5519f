//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint exposing `/v1/chat/completions`: OpenAI itself or a
//! gateway such as a LiteLLM proxy fronting several hosted models.

use crate::http::{build_client, post_json_with_retry};
use crate::LlmError;
use async_trait::async_trait;
use insight_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default gateway endpoint
pub const DEFAULT_GATEWAY: &str = "http://localhost:4000";

/// Default timeout for chat completion requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Provider for OpenAI-compatible chat completion APIs
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_attempts: u32,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider for `endpoint` (without the `/v1/...` suffix)
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            client: build_client(timeout)?,
            max_attempts: crate::ollama::DEFAULT_MAX_ATTEMPTS,
            temperature: 0.7,
            max_tokens: 1024,
        })
    }

    /// Authenticate with a bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set sampling temperature and the completion length limit
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response: ChatResponse = post_json_with_retry(
            &self.client,
            &self.completions_url(),
            &request_body,
            self.api_key.as_deref(),
            &self.model,
            self.max_attempts,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
