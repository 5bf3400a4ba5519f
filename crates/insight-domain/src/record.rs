//! Insight records - one per processed paper

use crate::paper::PaperMetadata;
use serde::{Deserialize, Serialize};

/// A paper's metadata together with the insights the summarizer produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    /// Metadata of the paper the insights belong to
    pub meta: PaperMetadata,

    /// Ordered insight strings
    pub insights: Vec<String>,
}

impl InsightRecord {
    /// Create a new record
    pub fn new(meta: PaperMetadata, insights: Vec<String>) -> Self {
        Self { meta, insights }
    }

    /// Number of insights in the record
    pub fn insight_count(&self) -> usize {
        self.insights.len()
    }
}
