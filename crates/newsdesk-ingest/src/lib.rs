use std::path::Path;

use chrono::Utc;
use newsdesk_core::{Article, ArticleRepository, ArticleStatus, NewArticle, PdfBackend, base_slug};
use newsdesk_parsing::{ArticleExtractor, ParsingError};
use thiserror::Error;

// Re-export domain types for convenience
pub use newsdesk_core::{ExtractionResult, ParsedCandidate, SkipStats};

/// Title prefix length used for the near-duplicate lookup.
pub const DUPLICATE_PREFIX_CHARS: usize = 50;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("PDF extraction error: {0}")]
    Pdf(#[from] ParsingError),
}

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Articles inserted, in source order.
    pub created: Vec<Article>,
    /// Candidates skipped because a similar title already exists.
    pub duplicates: usize,
    /// Candidates the extractor produced.
    pub total: usize,
    /// One message per candidate that failed to persist.
    pub errors: Vec<String>,
    pub skip_stats: SkipStats,
}

impl IngestReport {
    /// Number of articles created.
    pub fn count(&self) -> usize {
        self.created.len()
    }
}

/// Extract a PDF with `backend` and store every new candidate as a draft.
///
/// `filename` is recorded on each article as its source PDF.
pub fn ingest_pdf(
    path: &Path,
    filename: &str,
    backend: &dyn PdfBackend,
    extractor: &ArticleExtractor,
    repo: &dyn ArticleRepository,
) -> Result<IngestReport, IngestError> {
    let extraction = extractor.extract_via_backend(path, backend)?;
    Ok(ingest_extraction(extraction, filename, repo))
}

/// Same as [`ingest_pdf`] for text that has already been extracted.
pub fn ingest_text(
    text: &str,
    filename: &str,
    extractor: &ArticleExtractor,
    repo: &dyn ArticleRepository,
) -> IngestReport {
    ingest_extraction(extractor.extract_from_text(text), filename, repo)
}

/// Persist candidates one by one. A failure on one candidate is recorded in
/// [`IngestReport::errors`] and the rest of the batch continues.
pub fn ingest_extraction(
    extraction: ExtractionResult,
    filename: &str,
    repo: &dyn ArticleRepository,
) -> IngestReport {
    let mut report = IngestReport {
        total: extraction.candidates.len(),
        skip_stats: extraction.skip_stats,
        ..Default::default()
    };

    for candidate in extraction.candidates {
        let title = candidate.title.clone();
        match store_candidate(candidate, filename, repo) {
            Ok(Some(article)) => report.created.push(article),
            Ok(None) => {
                tracing::debug!(title = %title, "skipping near-duplicate");
                report.duplicates += 1;
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "failed to store candidate");
                report.errors.push(format!("Failed to create article: {title}"));
            }
        }
    }

    tracing::info!(
        file = %filename,
        created = report.count(),
        duplicates = report.duplicates,
        failed = report.errors.len(),
        total = report.total,
        "ingested document"
    );
    report
}

/// First `DUPLICATE_PREFIX_CHARS` characters of a title.
pub fn title_prefix(title: &str) -> &str {
    match title.char_indices().nth(DUPLICATE_PREFIX_CHARS) {
        Some((idx, _)) => &title[..idx],
        None => title,
    }
}

fn store_candidate(
    candidate: ParsedCandidate,
    filename: &str,
    repo: &dyn ArticleRepository,
) -> Result<Option<Article>, newsdesk_core::RepositoryError> {
    if repo
        .find_by_title_fragment(title_prefix(&candidate.title))?
        .is_some()
    {
        return Ok(None);
    }

    let slug = base_slug(&candidate.title);
    let mut article = NewArticle::new(candidate.title, candidate.summary, candidate.full_content);
    article.category = candidate.category;
    article.tags = candidate.tags;
    article.status = Some(ArticleStatus::Draft);
    article.pdf_file = Some(filename.to_string());
    article.publish_date = Some(Utc::now());
    repo.create(article, &slug).map(Some)
}
