use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{normalize_whitespace, take_chars};

/// Shortened first lines must be longer than this to be used as a title.
const MIN_SENTENCE_TITLE_CHARS: usize = 10;

/// Derive a title from a segment.
///
/// Uses the first non-blank line. Lines over 150 characters are shortened
/// to their first sentence when it is longer than 10 characters, and to
/// their first 150 characters otherwise. A long line without a period is
/// its own first sentence and is kept whole. The result is passed through
/// [`clean_title`]. Returns `None` when the segment has no non-blank line.
pub fn extract_title(segment: &str) -> Option<String> {
    extract_title_with_config(segment, &ParsingConfig::default())
}

/// Config-aware version of [`extract_title`].
pub(crate) fn extract_title_with_config(segment: &str, config: &ParsingConfig) -> Option<String> {
    let first_line = segment.lines().map(str::trim).find(|l| !l.is_empty())?;
    let max = config.max_title_chars;

    let raw = if first_line.chars().count() > max {
        let first_sentence = first_line.split('.').next().unwrap_or(first_line);
        let len = first_sentence.chars().count();
        if len > MIN_SENTENCE_TITLE_CHARS {
            first_sentence
        } else {
            take_chars(first_line, max)
        }
    } else {
        first_line
    };

    Some(clean_title(raw))
}

/// Remove list artifacts from a title.
///
/// Strips one leading `"12. "` style number, then one leading bullet
/// (`•`, `-` or `*`), collapses whitespace, and trims.
pub fn clean_title(title: &str) -> String {
    static NUM_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());
    static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-*]\s*").unwrap());

    let title = NUM_PREFIX.replace(title, "");
    let title = BULLET_PREFIX.replace(&title, "");
    normalize_whitespace(&title)
}
