//! Domain types and contracts shared by every newsdesk crate.
//!
//! The extractor produces [`ParsedCandidate`]s, the ingestion workflow turns
//! them into [`NewArticle`]s, and an [`ArticleRepository`] persists them.

use serde::{Deserialize, Serialize};

pub mod article;
pub mod backend;
pub mod config_file;
pub mod query;
pub mod repository;
pub mod slug;
pub mod tags;

// Re-export for convenience
pub use article::{Article, ArticleStatus, Counter, DEFAULT_AUTHOR, NewArticle, ParseStatusError};
pub use backend::{BackendError, PdfBackend, StaticTextBackend};
pub use config_file::ConfigFile;
pub use query::{ArticleOrder, ArticleQuery, Page, Pagination};
pub use repository::{ArticleRepository, RepositoryError};
pub use slug::{base_slug, unique_slug};

/// A structured article candidate extracted from one text segment.
///
/// Transient: produced once per segment and handed to the caller, which
/// decides deduplication and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCandidate {
    pub title: String,
    pub summary: String,
    /// The segment text, verbatim.
    pub full_content: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Counts of segments that did not become candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipStats {
    /// Segments produced by the blank-line split, before filtering.
    pub total_segments: usize,
    /// Segments at or under the minimum length.
    pub too_short: usize,
    /// Segments with no non-blank line to take a title from.
    pub no_title: usize,
    /// Qualifying segments dropped because the candidate cap was reached.
    pub truncated: usize,
}

/// Result of running the extractor over a document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub candidates: Vec<ParsedCandidate>,
    pub skip_stats: SkipStats,
}
