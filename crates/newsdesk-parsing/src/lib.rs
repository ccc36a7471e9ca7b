//! Turns the text layer of an uploaded PDF into candidate news articles.
//!
//! The pipeline is a single pass: split on blank lines, drop short
//! segments, then derive a title, summary, category and tags for each
//! remaining segment. It performs no I/O of its own except through a
//! [`PdfBackend`] when asked to.

use std::path::Path;

use thiserror::Error;

pub mod classify;
pub mod config;
pub mod extractor;
pub mod section;
pub mod summary;
pub mod text_processing;
pub mod title;

pub use classify::{GENERAL_CATEGORY, category_names, determine_category, extract_tags};
pub use config::{CategoryRule, ConfigError, ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::{ArticleExtractor, ParsedSegment, SkipReason};
pub use section::segment_text;
pub use summary::create_summary;
pub use title::{clean_title, extract_title};
// Re-export domain types from core (canonical definitions live there)
pub use newsdesk_core::{BackendError, ExtractionResult, ParsedCandidate, PdfBackend, SkipStats};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Extract candidate articles from a PDF file using the given backend for
/// text extraction.
///
/// Pipeline:
/// 1. Extract text from the PDF via `backend`
/// 2. Split on blank lines and drop segments of 50 characters or fewer
/// 3. For each segment, derive title, summary, category and tags
/// 4. Stop after 50 candidates
pub fn extract_articles(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractionResult, ParsingError> {
    ArticleExtractor::new().extract_via_backend(pdf_path, backend)
}

/// Extract candidate articles from already-extracted text.
pub fn extract_articles_from_text(text: &str) -> ExtractionResult {
    ArticleExtractor::new().extract_from_text(text)
}
