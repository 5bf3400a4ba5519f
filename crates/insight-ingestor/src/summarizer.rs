//! LLM-backed `Summarizer`

use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::parser::parse_insights;
use crate::prompt::PromptBuilder;
use async_trait::async_trait;
use insight_domain::traits::{LlmProvider, Summarizer};
use insight_domain::{InsightRecord, PaperMetadata};
use insight_llm::LlmError;
use tracing::{debug, info};

/// Summarizes papers by prompting an [`LlmProvider`]
pub struct LlmSummarizer<P> {
    provider: P,
    config: SummarizerConfig,
}

impl<P> LlmSummarizer<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Create a new summarizer
    pub fn new(provider: P, config: SummarizerConfig) -> Self {
        Self { provider, config }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> Summarizer for LlmSummarizer<P>
where
    P: LlmProvider<Error = LlmError>,
{
    type Error = SummarizeError;

    async fn summarize(
        &self,
        text: &str,
        meta: &PaperMetadata,
    ) -> Result<InsightRecord, Self::Error> {
        let prompt = PromptBuilder::new(meta, text)
            .with_max_text_chars(self.config.max_text_chars)
            .with_max_insights(self.config.max_insights)
            .build();

        debug!("Prompt length: {} chars", prompt.len());

        let response = self.provider.generate(&prompt).await?;

        debug!("LLM response length: {} chars", response.len());

        let mut insights = parse_insights(&response)?;
        insights.truncate(self.config.max_insights);

        info!(
            model = self.provider.model_name(),
            "Summarized '{}' into {} insights",
            meta.title,
            insights.len()
        );

        Ok(InsightRecord::new(meta.clone(), insights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_llm::MockProvider;

    fn meta() -> PaperMetadata {
        PaperMetadata::new("Quantum Computing Research", vec!["Alice Johnson".to_string()], "q.txt")
    }

    #[tokio::test]
    async fn test_summarize_parses_insights() {
        let provider = MockProvider::new(r#"["Qubits decohere", "Error correction helps"]"#);
        let summarizer = LlmSummarizer::new(provider, SummarizerConfig::default());

        let record = summarizer.summarize("text", &meta()).await.unwrap();
        assert_eq!(record.meta, meta());
        assert_eq!(record.insights, vec!["Qubits decohere", "Error correction helps"]);
        assert_eq!(summarizer.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn test_summarize_caps_insights() {
        let provider = MockProvider::new(r#"["1", "2", "3", "4", "5", "6", "7"]"#);
        let config = SummarizerConfig {
            max_insights: 5,
            ..SummarizerConfig::default()
        };
        let summarizer = LlmSummarizer::new(provider, config);

        let record = summarizer.summarize("text", &meta()).await.unwrap();
        assert_eq!(record.insight_count(), 5);
        assert_eq!(record.insights.last().map(String::as_str), Some("5"));
    }

    #[tokio::test]
    async fn test_summarize_prompt_is_truncated() {
        let provider = MockProvider::new(r#"["ok"]"#);
        let config = SummarizerConfig {
            max_text_chars: 10,
            ..SummarizerConfig::default()
        };
        let summarizer = LlmSummarizer::new(provider, config);

        summarizer.summarize(&"z".repeat(50), &meta()).await.unwrap();
        let prompt = &summarizer.provider().prompts()[0];
        assert!(prompt.contains(&"z".repeat(10)));
        assert!(!prompt.contains(&"z".repeat(11)));
        assert!(prompt.contains("Title: Quantum Computing Research"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockProvider::new(r#"["ok"]"#);
        provider.add_error("Quantum");
        let summarizer = LlmSummarizer::new(provider, SummarizerConfig::default());

        let err = summarizer.summarize("text", &meta()).await.unwrap_err();
        assert!(matches!(err, SummarizeError::Llm(_)));
    }

    #[tokio::test]
    async fn test_unusable_response_is_invalid() {
        let provider = MockProvider::new("Sorry, I can't help with that.");
        let summarizer = LlmSummarizer::new(provider, SummarizerConfig::default());

        let err = summarizer.summarize("text", &meta()).await.unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidResponse(_)));
    }
}
