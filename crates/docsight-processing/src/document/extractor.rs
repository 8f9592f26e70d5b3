//! PDF text extraction
//!
//! Parsing runs on the blocking pool. A parser panic on a malformed file is reported
//! as an ordinary extraction failure instead of taking the request down with it.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that end an upload before any insight is derived.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unable to read document: {0}")]
    Read(String),

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Turns document bytes into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text, failing if the document is unreadable or yields only whitespace.
    async fn extract(&self, data: &[u8]) -> Result<String, ExtractionError>;

    /// Read a stored document and extract its text.
    async fn extract_file(&self, path: &Path) -> Result<String, ExtractionError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ExtractionError::Read(format!("{}: {}", path.display(), e)))?;
        self.extract(&data).await
    }
}

/// Extractor backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let bytes = data.to_vec();
        let start = std::time::Instant::now();

        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractionError::Parse("PDF parser aborted on malformed input".to_string())
            } else {
                ExtractionError::Parse(format!("Extraction task failed: {}", e))
            }
        })?
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let page_count = pages.len();
        let text = join_pages(pages);

        if text.trim().is_empty() {
            tracing::warn!(page_count, "PDF text extraction returned empty");
            return Err(ExtractionError::NoText);
        }

        tracing::debug!(
            page_count,
            text_len = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "PDF text extracted"
        );

        Ok(text)
    }
}

/// Concatenate page texts in page order. Pages that yielded nothing contribute nothing.
fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{create_pdf, create_text_pdf};

    #[tokio::test]
    async fn test_extracts_text_from_single_page() {
        let pdf = create_text_pdf("Senior Rust engineer with tokio experience");
        let text = PdfTextExtractor::new().extract(&pdf).await.unwrap();
        assert!(text.contains("Senior Rust engineer with tokio experience"));
    }

    #[tokio::test]
    async fn test_pages_are_concatenated_in_order() {
        let pdf = create_pdf(&["alpha first page", "", "omega last page"]);
        let text = PdfTextExtractor::new().extract(&pdf).await.unwrap();

        let alpha = text.find("alpha").unwrap();
        let omega = text.find("omega").unwrap();
        assert!(alpha < omega);
    }

    #[tokio::test]
    async fn test_blank_pdf_is_rejected() {
        let pdf = create_pdf(&[""]);
        let result = PdfTextExtractor::new().extract(&pdf).await;
        assert!(matches!(result, Err(ExtractionError::NoText)));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_rejected() {
        let result = PdfTextExtractor::new()
            .extract(b"this is not a pdf at all")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extract_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        tokio::fs::write(&path, create_text_pdf("kubernetes operator"))
            .await
            .unwrap();

        let text = PdfTextExtractor::new().extract_file(&path).await.unwrap();
        assert!(text.contains("kubernetes operator"));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let result = PdfTextExtractor::new()
            .extract_file(Path::new("/nonexistent/path/to/file.pdf"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Read(_))));
    }

    #[test]
    fn test_join_pages_keeps_order() {
        let joined = join_pages(vec!["a ".into(), String::new(), "b".into()]);
        assert_eq!(joined, "a b");
    }
}
