//! Paper Insights Ingestor
//!
//! Turns a directory of papers into insight records appended to a markdown
//! file.
//!
//! # Overview
//!
//! Each `.pdf`/`.txt` file in the input directory is read, its title and
//! authors are extracted heuristically, the text is handed to a
//! [`Summarizer`](insight_domain::traits::Summarizer), and the resulting
//! record is appended through an
//! [`InsightStore`](insight_domain::traits::InsightStore).
//!
//! # Architecture
//!
//! ```text
//! papers/ → Ingestor → extract_metadata → Summarizer → InsightStore → research-insights.md
//! ```
//!
//! # Key Features
//!
//! - **Metadata extraction**: pure title/author heuristics, see [`extract_metadata`]
//! - **Best-effort batches**: a failing paper is logged and recorded, the rest still run
//! - **Structured failures**: every per-file error carries the `PROCESSING_FAILED` category
//! - **LLM summarizer**: [`LlmSummarizer`] prompts any `LlmProvider` and parses its reply
//!
//! # Example Usage
//!
//! ```no_run
//! use insight_ingestor::{Ingestor, IngestorConfig, LlmSummarizer, SummarizerConfig};
//! use insight_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"["Emergence arises from local rules"]"#);
//! let summarizer = LlmSummarizer::new(provider, SummarizerConfig::default());
//! let ingestor = Ingestor::from_config(summarizer, IngestorConfig::default());
//!
//! let report = ingestor.process_once().await?;
//!
//! println!("Processed: {}", report.processed.len());
//! println!("Failed: {}", report.failed.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod ingestor;
mod loader;
mod metadata;
mod parser;
mod prompt;
mod summarizer;


pub use config::{IngestorConfig, SummarizerConfig};
pub use error::{
    CompactError, FailureReason, IngestError, SummarizeError, DIRECTORY_UNREADABLE,
    PROCESSING_FAILED,
};
pub use ingestor::{BatchReport, FailedPaper, Ingestor, Scan};
pub use loader::load_text;
pub use metadata::{extract_metadata, MAX_TITLE_CHARS, MAX_TITLE_WORDS};
pub use parser::parse_insights;
pub use prompt::PromptBuilder;
pub use summarizer::LlmSummarizer;
