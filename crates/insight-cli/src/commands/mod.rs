//! Command implementations.

pub mod config;
pub mod ingest;
pub mod serve;
pub mod show;
pub mod watch;

pub use self::config::execute_config;
pub use self::ingest::{execute_ingest, execute_paper};
pub use self::serve::execute_serve;
pub use self::show::execute_show;
pub use self::watch::{execute_watch, Watcher};

use crate::config::Config;
use crate::error::Result;
use insight_ingestor::{Ingestor, LlmSummarizer};
use insight_llm::{AnyProvider, BudgetGuard};
use insight_store::MarkdownStore;

/// Ingestor wired to the configured provider, budget guard and markdown file.
pub type Pipeline = Ingestor<LlmSummarizer<BudgetGuard<AnyProvider>>, MarkdownStore>;

/// Build the ingestion pipeline from configuration.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    config.validate()?;

    let provider = AnyProvider::from_config(&config.llm)?;
    let guarded = BudgetGuard::new(provider, &config.budget);
    let summarizer = LlmSummarizer::new(guarded, config.summarizer.clone());

    Ok(Ingestor::from_config(summarizer, config.ingestor.clone()))
}
