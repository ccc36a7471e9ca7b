//! URL slugs derived from article titles.
//!
//! There are two deliberately separate paths: PDF imports use the bare
//! [`base_slug`] (the ingestion workflow checks for near-duplicates before
//! inserting), while manually created articles use [`unique_slug`], which
//! appends a millisecond timestamp so no lookup is needed.

use std::sync::atomic::{AtomicI64, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;

/// Lower-case, hyphenated, URL-safe form of `title`.
///
/// `"JEE Advanced 2024: Results!"` becomes `"jee-advanced-2024-results"`.
pub fn base_slug(title: &str) -> String {
    static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    static HYPHENS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

    let lower = title.to_lowercase();
    let kept = DISALLOWED_RE.replace_all(&lower, "");
    let hyphenated = WS_RE.replace_all(&kept, "-");
    let collapsed = HYPHENS_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// [`base_slug`] with a `-{unix_millis}` suffix.
///
/// The suffix is strictly increasing within the process, so two calls with
/// the same title never return the same slug even inside one millisecond.
pub fn unique_slug(title: &str) -> String {
    let stamp = next_stamp(chrono::Utc::now().timestamp_millis());
    let base = base_slug(title);
    if base.is_empty() {
        stamp.to_string()
    } else {
        format!("{base}-{stamp}")
    }
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

fn next_stamp(now_millis: i64) -> i64 {
    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now_millis.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}
