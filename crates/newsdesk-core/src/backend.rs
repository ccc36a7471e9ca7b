use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the byte-to-text step only; segmentation and
/// per-segment derivation (title, summary, category, tags) live in
/// `newsdesk_parsing::ArticleExtractor`.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text layer of a PDF file.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}

/// A backend that returns fixed text regardless of the path. Useful in tests
/// and for feeding pre-extracted text through the same pipeline.
pub struct StaticTextBackend(pub String);

impl PdfBackend for StaticTextBackend {
    fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
        Ok(self.0.clone())
    }
}
