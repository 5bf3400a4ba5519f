//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates.

use crate::{InsightRecord, PaperMetadata};
use async_trait::async_trait;

/// Trait for persisting and reading back insight records
///
/// Implemented by the infrastructure layer (insight-store). The store is
/// append-only: records come back from `read_all` in the order they were
/// appended.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Error type for store operations
    type Error: std::fmt::Display + Send;

    /// Append one record to the end of the store
    ///
    /// Text stores may normalize values on the way in, so `read_all` is not
    /// guaranteed to return the record byte for byte.
    async fn append(&self, record: &InsightRecord) -> Result<(), Self::Error>;

    /// Read every record, in append order
    async fn read_all(&self) -> Result<Vec<InsightRecord>, Self::Error>;
}

/// Trait for turning a paper's text into insights
///
/// Implemented by the application layer (insight-ingestor) on top of an
/// [`LlmProvider`], and by fakes in tests.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Error type for summarization
    type Error: std::fmt::Display + Send;

    /// Summarize `text` into a record carrying `meta` and the insights
    async fn summarize(&self, text: &str, meta: &PaperMetadata)
        -> Result<InsightRecord, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (insight-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a text completion for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model answering the prompts
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct VecStore(Mutex<Vec<InsightRecord>>);

    #[async_trait]
    impl InsightStore for VecStore {
        type Error = String;

        async fn append(&self, record: &InsightRecord) -> Result<(), String> {
            self.0.lock().map_err(|e| e.to_string())?.push(record.clone());
            Ok(())
        }

        async fn read_all(&self) -> Result<Vec<InsightRecord>, String> {
            Ok(self.0.lock().map_err(|e| e.to_string())?.clone())
        }
    }

    #[tokio::test]
    async fn test_store_trait_object_keeps_order() {
        let store: Box<dyn InsightStore<Error = String>> = Box::new(VecStore(Mutex::new(Vec::new())));

        for title in ["first", "second", "third"] {
            let meta = PaperMetadata::new(title, vec![], format!("{title}.txt"));
            store.append(&InsightRecord::new(meta, vec![])).await.unwrap();
        }

        let titles: Vec<String> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.meta.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
