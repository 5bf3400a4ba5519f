//! Paper text loading
//!
//! `.txt` files are read as UTF-8 (invalid bytes are replaced), `.pdf` files
//! go through `pdf-extract` on the blocking pool.

use crate::error::FailureReason;
use insight_domain::PaperFormat;
use std::path::Path;
use tracing::debug;

/// Read the text of a paper
pub async fn load_text(path: &Path) -> Result<String, FailureReason> {
    let format = PaperFormat::from_path(path).ok_or_else(|| {
        FailureReason::ReadFailed(format!("unsupported file type: {}", path.display()))
    })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FailureReason::ReadFailed(e.to_string()))?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());

    match format {
        PaperFormat::Txt => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        PaperFormat::Pdf => pdf_text(bytes).await,
    }
}

async fn pdf_text(bytes: Vec<u8>) -> Result<String, FailureReason> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| FailureReason::ReadFailed(format!("PDF worker failed: {}", e)))?
        .map_err(|e| FailureReason::ReadFailed(format!("PDF extraction failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_txt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.txt");
        std::fs::write(&path, "Title\nby Someone\n").unwrap();

        let text = load_text(&path).await.unwrap();
        assert_eq!(text, "Title\nby Someone\n");
    }

    #[tokio::test]
    async fn test_load_txt_invalid_utf8_is_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.TXT");
        std::fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();

        let text = load_text(&path).await.unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_failure() {
        let err = load_text(Path::new("/definitely/not/here.txt")).await.unwrap_err();
        assert_eq!(err.kind(), "READ_FAILED");
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let err = load_text(Path::new("diagram.png")).await.unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();

        let err = load_text(&path).await.unwrap_err();
        assert!(matches!(err, FailureReason::ReadFailed(_)));
    }
}
