use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split document text into candidate article segments.
///
/// Segments are separated by one or more blank lines. Each segment is
/// trimmed, and segments of 50 characters or fewer are dropped. Source
/// order is preserved.
pub fn segment_text(text: &str) -> Vec<String> {
    segment_text_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`segment_text`].
pub(crate) fn segment_text_with_config(text: &str, config: &ParsingConfig) -> Vec<String> {
    split_raw(text, config)
        .into_iter()
        .filter(|s| is_long_enough(s, config))
        .map(|s| s.trim().to_string())
        .collect()
}

/// Every piece produced by the separator, unfiltered.
pub(crate) fn split_raw<'a>(text: &'a str, config: &ParsingConfig) -> Vec<&'a str> {
    let re = config.segment_separator_re.as_ref().unwrap_or(&BLANK_LINE_RE);
    re.split(text).collect()
}

/// Whether a raw piece survives the minimum-length filter.
pub(crate) fn is_long_enough(segment: &str, config: &ParsingConfig) -> bool {
    segment.trim().chars().count() > config.min_segment_chars
}
