use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_processing::take_chars;

/// Sentences must be longer than this (trimmed) to count.
const MIN_SENTENCE_CHARS: usize = 10;
/// A second sentence is appended only while the summary is shorter than this.
const SECOND_SENTENCE_BELOW: usize = 150;
const MAX_SUMMARY_CHARS: usize = 300;
/// Length of the raw-text fallback when no sentence qualifies.
const FALLBACK_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// Build a one- or two-sentence summary of a segment.
///
/// Sentences are split on runs of `.`, `!` and `?`. The first qualifying
/// sentence is used, plus the second when the first is short. Results over
/// 300 characters are cut to 297 plus an ellipsis. The summary always ends
/// with a period; an ellipsis already counts.
pub fn create_summary(content: &str) -> String {
    static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

    let mut sentences = SENTENCE_END_RE
        .split(content)
        .filter(|s| s.trim().chars().count() > MIN_SENTENCE_CHARS);

    let Some(first) = sentences.next() else {
        return format!("{}{ELLIPSIS}", take_chars(content, FALLBACK_CHARS));
    };

    let mut summary = first.trim().to_string();
    if let Some(second) = sentences.next() {
        if summary.chars().count() < SECOND_SENTENCE_BELOW {
            summary.push_str(". ");
            summary.push_str(second.trim());
        }
    }

    if summary.chars().count() > MAX_SUMMARY_CHARS {
        let cut = take_chars(&summary, MAX_SUMMARY_CHARS - ELLIPSIS.len()).to_string();
        summary = format!("{cut}{ELLIPSIS}");
    }

    if !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}
