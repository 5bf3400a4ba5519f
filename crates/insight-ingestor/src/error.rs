//! Error types for the Ingestor

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Category reported for any per-file failure
pub const PROCESSING_FAILED: &str = "PROCESSING_FAILED";

/// Category reported when the input directory cannot be listed
pub const DIRECTORY_UNREADABLE: &str = "DIRECTORY_UNREADABLE";

/// Why a single paper could not be processed
#[derive(Error, Debug)]
pub enum FailureReason {
    /// Source file missing or unreadable
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Summarizer errored or timed out
    #[error("summarization failed: {0}")]
    SummarizationFailed(String),

    /// The record could not be appended
    #[error("store failed: {0}")]
    StoreFailed(String),
}

impl FailureReason {
    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::ReadFailed(_) => "READ_FAILED",
            FailureReason::SummarizationFailed(_) => "SUMMARIZATION_FAILED",
            FailureReason::StoreFailed(_) => "STORE_FAILED",
        }
    }
}

/// Errors that can occur during ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// The input directory could not be listed
    #[error("Failed to read input directory {path}: {source}")]
    Directory {
        /// Directory that was scanned
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A single paper failed
    #[error("Processing failed for {file}: {reason}")]
    ProcessingFailed {
        /// Path of the paper
        file: String,
        /// What went wrong
        reason: FailureReason,
    },
}

impl IngestError {
    /// Build a per-file failure
    pub fn processing(file: &Path, reason: FailureReason) -> Self {
        IngestError::ProcessingFailed {
            file: file.display().to_string(),
            reason,
        }
    }

    /// Error category as reported in the structured error marker
    pub fn category(&self) -> &'static str {
        match self {
            IngestError::Directory { .. } => DIRECTORY_UNREADABLE,
            IngestError::ProcessingFailed { .. } => PROCESSING_FAILED,
        }
    }

    /// Structured form of the error for log markers
    pub fn compact(&self) -> CompactError {
        match self {
            IngestError::Directory { path, source } => CompactError {
                category: self.category(),
                kind: None,
                file: path.clone(),
                message: source.to_string(),
            },
            IngestError::ProcessingFailed { file, reason } => CompactError {
                category: self.category(),
                kind: Some(reason.kind()),
                file: file.clone(),
                message: reason.to_string(),
            },
        }
    }
}

/// Errors from the LLM-backed summarizer
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The provider call failed
    #[error("LLM error: {0}")]
    Llm(#[from] insight_llm::LlmError),

    /// The response held no usable insights
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// One-line structured error marker, emitted as `COMPACT_ERROR: {json}`
#[derive(Debug, Clone, Serialize)]
pub struct CompactError {
    /// Error category, e.g. `PROCESSING_FAILED`
    pub category: &'static str,
    /// Failure kind within the category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// File or directory involved
    pub file: String,
    /// Human-readable message
    pub message: String,
}

impl CompactError {
    /// Marker prefix
    pub const PREFIX: &'static str = "COMPACT_ERROR:";

    /// Serialize as compact JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"category":"{}","message":"unserializable error"}}"#, self.category)
        })
    }
}

impl std::fmt::Display for CompactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", Self::PREFIX, self.to_json())
    }
}
