//! Paper Insights Domain Layer
//!
//! This crate contains the core data model for the paper ingestion pipeline
//! and the trait interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Paper**: a single input document (PDF or plain text)
//! - **PaperMetadata**: title, authors and source file name derived from a paper
//! - **Insight**: one bullet-point takeaway produced by the summarizer
//! - **InsightRecord**: a paper's metadata together with its insights
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - The summarizer, the store and the LLM backends live in other crates
//! - Infrastructure is injected through the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod paper;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use format::PaperFormat;
pub use paper::{PaperMetadata, UNKNOWN_AUTHOR};
pub use record::InsightRecord;
