//! Supported paper formats

use std::path::Path;

/// File format of an ingestible paper
///
/// Only these formats are picked up when scanning an input directory;
/// every other extension is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperFormat {
    /// Portable Document Format, text pulled out by a PDF-to-text collaborator
    Pdf,

    /// Plain UTF-8 text, read as-is
    Txt,
}

impl PaperFormat {
    /// Get the canonical extension (lowercase, without the dot)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperFormat::Pdf => "pdf",
            PaperFormat::Txt => "txt",
        }
    }

    /// Parse a format from an extension, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Some(PaperFormat::Pdf),
            "txt" => Some(PaperFormat::Txt),
            _ => None,
        }
    }

    /// Detect the format from a path's extension
    ///
    /// # Examples
    ///
    /// ```
    /// use insight_domain::PaperFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(PaperFormat::from_path(Path::new("paper.PDF")), Some(PaperFormat::Pdf));
    /// assert_eq!(PaperFormat::from_path(Path::new("notes.txt")), Some(PaperFormat::Txt));
    /// assert_eq!(PaperFormat::from_path(Path::new("image.png")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }
}

impl std::str::FromStr for PaperFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported paper format: {}", s))
    }
}
