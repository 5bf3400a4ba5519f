//! Core Ingestor implementation

use crate::config::IngestorConfig;
use crate::error::{FailureReason, IngestError};
use crate::loader::load_text;
use crate::metadata::extract_metadata;
use insight_domain::traits::{InsightStore, Summarizer};
use insight_domain::{InsightRecord, PaperFormat};
use insight_store::MarkdownStore;
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Result of listing the input directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Eligible papers, sorted by file name
    pub papers: Vec<PathBuf>,
    /// Entries that are not `.pdf`/`.txt` regular files
    pub skipped: Vec<PathBuf>,
}

/// A paper that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPaper {
    /// Path of the paper
    pub path: PathBuf,
    /// Rendered error
    pub error: String,
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Records appended, in processing order
    pub processed: Vec<InsightRecord>,
    /// Papers that failed
    pub failed: Vec<FailedPaper>,
    /// Entries ignored by the scan
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of papers attempted
    pub fn attempted(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// The Ingestor turns a directory of papers into appended insight records
pub struct Ingestor<S, T> {
    summarizer: S,
    store: T,
    config: IngestorConfig,
}

impl<S> Ingestor<S, MarkdownStore>
where
    S: Summarizer,
{
    /// Create an Ingestor writing to the markdown file named in `config`
    pub fn from_config(summarizer: S, config: IngestorConfig) -> Self {
        let store = MarkdownStore::new(config.output_path.clone());
        Self::new(summarizer, store, config)
    }
}

impl<S, T> Ingestor<S, T>
where
    S: Summarizer,
    T: InsightStore,
{
    /// Create a new Ingestor
    pub fn new(summarizer: S, store: T, config: IngestorConfig) -> Self {
        Self {
            summarizer,
            store,
            config,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &IngestorConfig {
        &self.config
    }

    /// The store records are appended to
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Process every eligible paper in the input directory once
    pub async fn process_once(&self) -> Result<BatchReport, IngestError> {
        let scan = self.scan().await?;

        info!(
            "Found {} papers in {} ({} skipped)",
            scan.papers.len(),
            self.config.input_dir.display(),
            scan.skipped.len()
        );

        let mut report = self.process_batch(&scan.papers).await;
        report.skipped = scan.skipped;
        Ok(report)
    }

    /// Process the given papers sequentially, continuing past failures
    pub async fn process_batch(&self, papers: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();

        for path in papers {
            match self.process_paper(path).await {
                Ok(record) => report.processed.push(record),
                Err(e) => report.failed.push(FailedPaper {
                    path: path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        if !report.failed.is_empty() {
            warn!(
                "{} of {} papers failed",
                report.failed.len(),
                report.attempted()
            );
        }

        report
    }

    /// List the input directory (non-recursive)
    pub async fn scan(&self) -> Result<Scan, IngestError> {
        let dir = &self.config.input_dir;
        let directory_error = |source| IngestError::Directory {
            path: dir.display().to_string(),
            source,
        };

        let mut entries = tokio::fs::read_dir(dir).await.map_err(directory_error)?;
        let mut scan = Scan::default();

        while let Some(entry) = entries.next_entry().await.map_err(directory_error)? {
            let path = entry.path();

            // Follows symlinks
            let is_file = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    false
                }
            };

            if is_file && PaperFormat::from_path(&path).is_some() {
                scan.papers.push(path);
            } else {
                debug!("Skipping {}", path.display());
                scan.skipped.push(path);
            }
        }

        scan.papers.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        scan.skipped.sort();

        Ok(scan)
    }

    /// Read, summarize and append a single paper
    ///
    /// Nothing is appended when any step fails. The failure is logged as a
    /// `COMPACT_ERROR:` marker and returned.
    pub async fn process_paper(&self, path: &Path) -> Result<InsightRecord, IngestError> {
        info!("Processing {}", path.display());

        match self.try_process(path).await {
            Ok(record) => {
                info!(
                    "Appended '{}' with {} insights",
                    record.meta.title,
                    record.insight_count()
                );
                Ok(record)
            }
            Err(reason) => {
                let err = IngestError::processing(path, reason);
                error!(
                    category = err.category(),
                    file = %path.display(),
                    "{}",
                    err.compact()
                );
                Err(err)
            }
        }
    }

    async fn try_process(&self, path: &Path) -> Result<InsightRecord, FailureReason> {
        let text = load_text(path).await?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let meta = extract_metadata(&text, &file_name);

        debug!(
            "Metadata for {}: title='{}', authors={:?}",
            file_name, meta.title, meta.authors
        );

        let record = timeout(
            self.config.summarize_timeout(),
            self.summarizer.summarize(&text, &meta),
        )
        .await
        .map_err(|_| {
            FailureReason::SummarizationFailed(format!(
                "timed out after {}s",
                self.config.summarize_timeout_secs
            ))
        })?
        .map_err(|e| FailureReason::SummarizationFailed(e.to_string()))?;

        self.store
            .append(&record)
            .await
            .map_err(|e| FailureReason::StoreFailed(e.to_string()))?;

        Ok(record)
    }
}
