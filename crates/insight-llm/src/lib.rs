//! Paper Insights LLM Provider Layer
//!
//! Pluggable LLM provider implementations behind the `LlmProvider` trait
//! from `insight-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `OpenAiProvider`: OpenAI-compatible chat completions (e.g. a LiteLLM gateway)
//!
//! Any provider can be wrapped in a [`BudgetGuard`] that enforces a daily
//! token budget.
//!
//! # Examples
//!
//! ```
//! use insight_llm::MockProvider;
//! use insight_domain::traits::LlmProvider;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod budget;
pub mod config;
mod http;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use insight_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use budget::{estimate_tokens, BudgetConfig, BudgetGuard, DailyUsage, UsageLedger};
pub use config::{AnyProvider, LlmConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Daily token budget spent
    #[error("Daily token budget exceeded: {used} of {budget} tokens used")]
    BudgetExceeded {
        /// Tokens already recorded today
        used: u64,
        /// Configured daily budget
        budget: u64,
    },

    /// Usage ledger could not be read or written
    #[error("Usage ledger error: {0}")]
    Ledger(String),

    /// Provider misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Registered replies are matched when the prompt *contains* the registered
/// key, so tests can target a paper by its title or source file name without
/// reproducing the whole prompt.
///
/// # Examples
///
/// ```
/// use insight_llm::MockProvider;
/// use insight_domain::traits::LlmProvider;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("Quantum", r#"["Qubits decohere"]"#);
/// assert_eq!(provider.generate("Title: Quantum Computing").await.unwrap(), r#"["Qubits decohere"]"#);
/// assert_eq!(provider.generate("anything else").await.unwrap(), "fallback");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, MockReply)>>>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for prompts containing `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).push((key.into(), MockReply::Text(response.into())));
    }

    /// Configure to return an error for prompts containing `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        lock(&self.responses).push((key.into(), MockReply::Fail));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        lock(&self.prompts).push(prompt.to_string());

        let responses = lock(&self.responses);
        let matched = responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone());

        match matched {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
