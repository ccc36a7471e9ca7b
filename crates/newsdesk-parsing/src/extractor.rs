use std::path::Path;

use crate::classify::{self, DEFAULT_CATEGORIES, DEFAULT_TAGS};
use crate::config::{CategoryRule, ParsingConfig};
use crate::{section, summary, text_processing, title};
use crate::{ExtractionResult, ParsedCandidate, ParsingError, PdfBackend, SkipStats};

/// A configurable text-to-articles pipeline.
///
/// Holds a [`ParsingConfig`] plus the category table and tag vocabulary
/// resolved from it, and exposes each pipeline step as a method.
pub struct ArticleExtractor {
    config: ParsingConfig,
    categories: Vec<CategoryRule>,
    vocabulary: Vec<String>,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        let categories = config.categories.resolve(&DEFAULT_CATEGORIES);
        let vocabulary = config.tag_vocabulary.resolve(&DEFAULT_TAGS);
        Self {
            config,
            categories,
            vocabulary,
        }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Split text into qualifying segments (step 1).
    pub fn segment(&self, text: &str) -> Vec<String> {
        section::segment_text_with_config(text, &self.config)
    }

    /// Derive a title from a segment (step 2).
    pub fn title(&self, segment: &str) -> Option<String> {
        title::extract_title_with_config(segment, &self.config)
    }

    /// Summarize a segment (step 3).
    pub fn summary(&self, segment: &str) -> String {
        summary::create_summary(segment)
    }

    /// Classify a segment (step 4).
    pub fn category(&self, segment: &str) -> String {
        classify::determine_category_in(&self.fold(segment), &self.categories)
    }

    /// Tag a segment (step 5).
    pub fn tags(&self, segment: &str) -> Vec<String> {
        classify::extract_tags_in(&self.fold(segment), &self.vocabulary, self.config.max_tags)
    }

    /// Turn one segment into a candidate, or report why it was skipped.
    pub fn parse_segment(&self, segment: &str) -> ParsedSegment {
        let Some(title) = self.title(segment) else {
            return ParsedSegment::Skip(SkipReason::NoTitle);
        };
        // A first line made only of list artifacts ("12.", "•") cleans to an
        // empty title; the segment is still emitted.

        let folded = self.fold(segment);
        ParsedSegment::Candidate(ParsedCandidate {
            title,
            summary: self.summary(segment),
            full_content: segment.to_string(),
            category: classify::determine_category_in(&folded, &self.categories),
            tags: classify::extract_tags_in(&folded, &self.vocabulary, self.config.max_tags),
        })
    }

    /// Run the pipeline on a PDF file, using `backend` for text extraction.
    pub fn extract_via_backend(
        &self,
        pdf_path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionResult, ParsingError> {
        let text = backend.extract_text(pdf_path)?;
        Ok(self.extract_from_text(&text))
    }

    /// Run the pipeline on already-extracted text.
    ///
    /// Never fails: empty input yields no candidates, and a segment that
    /// cannot produce a title is counted and skipped without affecting the
    /// others. At most `max_candidates` are returned, in source order.
    pub fn extract_from_text(&self, text: &str) -> ExtractionResult {
        let raw = section::split_raw(text, &self.config);
        let mut stats = SkipStats {
            total_segments: raw.len(),
            ..Default::default()
        };

        let mut candidates = Vec::new();
        for segment in raw {
            if !section::is_long_enough(segment, &self.config) {
                stats.too_short += 1;
                continue;
            }
            if candidates.len() >= self.config.max_candidates {
                stats.truncated += 1;
                continue;
            }
            match self.parse_segment(segment.trim()) {
                ParsedSegment::Candidate(c) => candidates.push(c),
                ParsedSegment::Skip(SkipReason::NoTitle) => stats.no_title += 1,
            }
        }

        tracing::debug!(
            segments = stats.total_segments,
            candidates = candidates.len(),
            too_short = stats.too_short,
            truncated = stats.truncated,
            "extracted article candidates"
        );

        ExtractionResult {
            candidates,
            skip_stats: stats,
        }
    }

    fn fold(&self, segment: &str) -> String {
        if self.config.expand_ligatures {
            text_processing::expand_ligatures(segment).to_lowercase()
        } else {
            segment.to_lowercase()
        }
    }
}

/// Result of parsing a single segment.
#[derive(Debug)]
pub enum ParsedSegment {
    Candidate(ParsedCandidate),
    Skip(SkipReason),
}

/// Reason a segment was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No non-blank line to derive a title from.
    NoTitle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingConfigBuilder;

    fn paragraph(seed: &str) -> String {
        format!("{seed}\nThe campus office shared further details with everyone today.")
    }

    #[test]
    fn test_extract_empty_input() {
        let ext = ArticleExtractor::new();
        assert!(ext.extract_from_text("").candidates.is_empty());
        assert!(ext.extract_from_text(" \n\n\t \n").candidates.is_empty());
    }

    #[test]
    fn test_extract_preserves_order() {
        let ext = ArticleExtractor::new();
        let text = [paragraph("First Notice"), paragraph("Second Notice"), paragraph("Third Notice")]
            .join("\n\n");
        let result = ext.extract_from_text(&text);
        let titles: Vec<_> = result.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First Notice", "Second Notice", "Third Notice"]);
        assert_eq!(result.skip_stats.total_segments, 3);
    }

    #[test]
    fn test_candidate_fields() {
        let ext = ArticleExtractor::new();
        let segment = "1. Breaking: University Opens Research Park\n\
                       The university opened a new research park this week. \
                       Students can register for internships from Monday.";
        match ext.parse_segment(segment) {
            ParsedSegment::Candidate(c) => {
                assert_eq!(c.title, "Breaking: University Opens Research Park");
                assert_eq!(c.full_content, segment);
                assert_eq!(c.category, "Education");
                assert_eq!(c.tags, vec!["breaking", "new", "research", "student", "university"]);
                assert!(c.summary.ends_with('.'));
            }
            ParsedSegment::Skip(r) => panic!("unexpected skip: {r:?}"),
        }
    }

    #[test]
    fn test_blank_segment_is_skipped() {
        let ext = ArticleExtractor::new();
        assert!(matches!(
            ext.parse_segment("   \n  "),
            ParsedSegment::Skip(SkipReason::NoTitle)
        ));
    }

    #[test]
    fn test_cap_is_enforced() {
        let ext = ArticleExtractor::new();
        let text = (0..70)
            .map(|i| paragraph(&format!("Notice number {i}")))
            .collect::<Vec<_>>()
            .join("\n\n");
        let result = ext.extract_from_text(&text);
        assert_eq!(result.candidates.len(), 50);
        assert_eq!(result.skip_stats.truncated, 20);
        assert_eq!(result.candidates[49].title, "Notice number 49");
    }

    #[test]
    fn test_custom_cap() {
        let config = ParsingConfigBuilder::new().max_candidates(2).build().unwrap();
        let ext = ArticleExtractor::with_config(config);
        let text = [paragraph("A notice here"), paragraph("B notice here"), paragraph("C notice here")]
            .join("\n\n");
        assert_eq!(ext.extract_from_text(&text).candidates.len(), 2);
    }

    #[test]
    fn test_list_marker_line_gives_empty_title() {
        let ext = ArticleExtractor::new();
        let segment = "12.\nThe hostel committee announced revised mess timings for all residents this term.";
        match ext.parse_segment(segment) {
            ParsedSegment::Candidate(c) => {
                assert_eq!(c.title, "");
                assert_eq!(c.full_content, segment);
            }
            ParsedSegment::Skip(r) => panic!("unexpected skip: {r:?}"),
        }

        let result = ext.extract_from_text(segment);
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.skip_stats.no_title, 0);
    }

    #[test]
    fn test_ligatures_matched_literally_by_default() {
        let ext = ArticleExtractor::new();
        let segment = "Lab notes\nA scientiﬁc method for cooking pasta in bulk quantities.";
        match ext.parse_segment(segment) {
            ParsedSegment::Candidate(c) => assert_eq!(c.category, "General"),
            ParsedSegment::Skip(r) => panic!("unexpected skip: {r:?}"),
        }
    }

    #[test]
    fn test_ligatures_expanded_for_matching_only() {
        let config = ParsingConfigBuilder::new().expand_ligatures(true).build().unwrap();
        let ext = ArticleExtractor::with_config(config);
        let segment = "Lab notes\nA scientiﬁc method for cooking pasta in bulk quantities.";
        match ext.parse_segment(segment) {
            ParsedSegment::Candidate(c) => {
                assert_eq!(c.category, "Science");
                assert!(c.full_content.contains('ﬁ'));
            }
            ParsedSegment::Skip(r) => panic!("unexpected skip: {r:?}"),
        }
    }

    #[test]
    fn test_custom_category_table() {
        let config = ParsingConfigBuilder::new()
            .set_categories(vec![CategoryRule::new("Campus Life", &["hostel"])])
            .build()
            .unwrap();
        let ext = ArticleExtractor::with_config(config);
        assert_eq!(ext.category("Hostel mess menu changes"), "Campus Life");
        assert_eq!(ext.category("Software update"), "General");
    }

    #[test]
    fn test_extract_via_backend() {
        let ext = ArticleExtractor::new();
        let backend = newsdesk_core::StaticTextBackend(paragraph("Backend Notice"));
        let result = ext
            .extract_via_backend(Path::new("unused.pdf"), &backend)
            .unwrap();
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].title, "Backend Notice");
    }
}
