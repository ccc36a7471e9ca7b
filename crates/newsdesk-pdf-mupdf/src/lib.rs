use std::path::Path;

use mupdf::{Document, TextPageFlags};

use newsdesk_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) so the catalog,
/// store and parsing crates do not depend on it transitively.
///
/// Running headers and footers (page numbers, masthead lines such as
/// "Campus Chronicle | Issue 14") would otherwise land inside articles that
/// span a page break, so text in the top 4% and bottom 5% of each page is
/// excluded by default. Pages are joined with a blank line, so a page break
/// always ends a segment.
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
    /// Emit a blank line after every layout block.
    block_breaks: bool,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            footer_exclusion_ratio: Some(0.05),
            header_exclusion_ratio: Some(0.04),
            block_breaks: false,
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Separate layout blocks with blank lines, so each block of a
    /// multi-column bulletin becomes its own segment.
    pub fn with_block_breaks(mut self, enabled: bool) -> Self {
        self.block_breaks = enabled;
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let header_threshold = self
                .header_exclusion_ratio
                .map(|r| page_bounds.y0 + page_height * r);
            let footer_threshold = self
                .footer_exclusion_ratio
                .map(|r| page_bounds.y1 - page_height * r);

            let mut page_text = String::new();
            for block in text_page.blocks() {
                let block_bounds = block.bounds();

                if header_threshold.is_some_and(|t| block_bounds.y1 <= t) {
                    continue;
                }
                if footer_threshold.is_some_and(|t| block_bounds.y0 >= t) {
                    continue;
                }

                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
                if self.block_breaks {
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(
            path = %path.display(),
            pages = pages_text.len(),
            "extracted PDF text layer"
        );

        Ok(pages_text.join("\n"))
    }
}
