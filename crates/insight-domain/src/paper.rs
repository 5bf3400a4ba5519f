//! Paper metadata - what the extractor learns about a document before summarizing it

use serde::{Deserialize, Serialize};

/// Author placeholder used when no author line can be found
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Title, authors and source of a single paper
///
/// Derived once per file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    /// Paper title (heading line or file stem)
    pub title: String,

    /// Ordered author names
    pub authors: Vec<String>,

    /// Base file name the paper was read from, extension included
    pub source: String,
}

impl PaperMetadata {
    /// Create new metadata
    pub fn new(title: impl Into<String>, authors: Vec<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            source: source.into(),
        }
    }

    /// Whether the authors could not be determined
    pub fn has_unknown_authors(&self) -> bool {
        self.authors.is_empty() || self.authors.iter().all(|a| a == UNKNOWN_AUTHOR)
    }

    /// Authors joined the way they appear in an `Authors:` line
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authors_line() {
        let meta = PaperMetadata::new(
            "Title",
            vec!["Alice".to_string(), "Bob".to_string()],
            "paper.txt",
        );
        assert_eq!(meta.authors_line(), "Alice, Bob");
        assert!(!meta.has_unknown_authors());
    }

    #[test]
    fn test_unknown_authors() {
        let meta = PaperMetadata::new("Title", vec![UNKNOWN_AUTHOR.to_string()], "paper.txt");
        assert!(meta.has_unknown_authors());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: metadata survives a JSON round trip unchanged
        #[test]
        fn test_json_roundtrip(
            title in ".{0,40}",
            authors in proptest::collection::vec("[A-Za-z .]{1,20}", 0..5),
            source in "[a-z]{1,10}\\.(pdf|txt)",
        ) {
            let meta = PaperMetadata::new(title, authors, source);
            let json = serde_json::to_string(&meta).unwrap();
            let parsed: PaperMetadata = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(meta, parsed);
        }
    }
}
