//! Paper Insights Storage Layer
//!
//! Implements the `InsightStore` trait on top of a single, append-only
//! markdown file. The file is the only persisted state of the pipeline:
//! the ingestor appends one section per processed paper and the HTTP API
//! parses the sections back into records.
//!
//! # File format
//!
//! ```text
//! ## <title>
//! - **Authors:** <author1>, <author2>
//! - **Source:** <source filename>
//! - **Key insights:**
//!   - <insight 1>
//!   - <insight 2>
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use insight_store::MarkdownStore;
//!
//! let store = MarkdownStore::new("docs/research-insights.md");
//! // Store is now ready for append / read_all
//! ```
//!
//! There is no locking: a reader running concurrently with an append may
//! observe a partially written section.

#![warn(missing_docs)]

pub mod markdown;

use async_trait::async_trait;
use insight_domain::traits::InsightStore;
use insight_domain::InsightRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub use markdown::{parse_sections, render_section};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The insights file does not exist yet
    #[error("Insights file not found: {0}")]
    NotFound(String),
}

/// Markdown-file implementation of `InsightStore`
#[derive(Debug, Clone)]
pub struct MarkdownStore {
    path: PathBuf,
}

impl MarkdownStore {
    /// Create a store backed by the markdown file at `path`
    ///
    /// Nothing is created on disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the markdown file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the markdown file exists
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[async_trait]
impl InsightStore for MarkdownStore {
    type Error = StoreError;

    async fn append(&self, record: &InsightRecord) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let section = render_section(record);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(section.as_bytes()).await?;
        file.flush().await?;

        debug!(
            "Appended section '{}' ({} insights) to {}",
            record.meta.title,
            record.insights.len(),
            self.path.display()
        );

        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<InsightRecord>, Self::Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(parse_sections(&contents))
    }
}
