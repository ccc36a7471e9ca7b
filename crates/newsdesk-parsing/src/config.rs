use newsdesk_core::config_file::ParsingSection;
use regex::Regex;
use thiserror::Error;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// A category name and the lowercase keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Configuration for the article extraction pipeline.
///
/// Defaults reproduce the stock heuristics exactly; every knob exists so an
/// editor can tune a deployment without touching code.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs ──
    /// Separator between segments. `None` means blank lines (`\n\s*\n`).
    pub(crate) segment_separator_re: Option<Regex>,
    /// Segments whose trimmed length is at or under this are dropped.
    pub(crate) min_segment_chars: usize,

    // ── extractor.rs ──
    /// Hard cap on candidates per document.
    pub(crate) max_candidates: usize,

    // ── title.rs ──
    /// First lines longer than this are shortened.
    pub(crate) max_title_chars: usize,

    // ── classify.rs ──
    /// Ordered category table; earlier rules win ties.
    pub(crate) categories: ListOverride<CategoryRule>,
    /// Flat tag vocabulary, in output order.
    pub(crate) tag_vocabulary: ListOverride<String>,
    pub(crate) max_tags: usize,

    // ── text_processing.rs ──
    /// Expand typographic ligatures before keyword matching.
    pub(crate) expand_ligatures: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            segment_separator_re: None,
            min_segment_chars: 50,
            max_candidates: 50,
            max_title_chars: 150,
            categories: ListOverride::Default,
            tag_vocabulary: ListOverride::Default,
            max_tags: 5,
            expand_ligatures: false,
        }
    }
}

impl ParsingConfig {
    pub fn min_segment_chars(&self) -> usize {
        self.min_segment_chars
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast if any pattern is invalid or a limit is zero.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    segment_separator_re: Option<String>,
    min_segment_chars: Option<usize>,
    max_candidates: Option<usize>,
    max_title_chars: Option<usize>,
    categories: ListOverride<CategoryRule>,
    tag_vocabulary: ListOverride<String>,
    max_tags: Option<usize>,
    expand_ligatures: Option<bool>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Segmentation ──

    pub fn segment_separator_regex(mut self, pattern: &str) -> Self {
        self.segment_separator_re = Some(pattern.to_string());
        self
    }

    pub fn min_segment_chars(mut self, n: usize) -> Self {
        self.min_segment_chars = Some(n);
        self
    }

    // ── Limits ──

    pub fn max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = Some(n);
        self
    }

    pub fn max_title_chars(mut self, n: usize) -> Self {
        self.max_title_chars = Some(n);
        self
    }

    pub fn max_tags(mut self, n: usize) -> Self {
        self.max_tags = Some(n);
        self
    }

    // ── Categories ──

    pub fn set_categories(mut self, rules: Vec<CategoryRule>) -> Self {
        self.categories = ListOverride::Replace(rules);
        self
    }

    /// Append a category after the built-in ones (lowest precedence).
    pub fn add_category(mut self, rule: CategoryRule) -> Self {
        match &mut self.categories {
            ListOverride::Extend(v) => v.push(rule),
            _ => self.categories = ListOverride::Extend(vec![rule]),
        }
        self
    }

    // ── Tags ──

    pub fn set_tag_vocabulary(mut self, tags: Vec<String>) -> Self {
        self.tag_vocabulary = ListOverride::Replace(tags);
        self
    }

    pub fn add_tag(mut self, tag: String) -> Self {
        match &mut self.tag_vocabulary {
            ListOverride::Extend(v) => v.push(tag),
            _ => self.tag_vocabulary = ListOverride::Extend(vec![tag]),
        }
        self
    }

    pub fn expand_ligatures(mut self, enabled: bool) -> Self {
        self.expand_ligatures = Some(enabled);
        self
    }

    /// Apply the `[parsing]` section of a config file. Unset keys keep
    /// whatever the builder already holds.
    pub fn with_file_section(mut self, section: Option<&ParsingSection>) -> Self {
        if let Some(section) = section {
            if let Some(n) = section.min_segment_chars {
                self.min_segment_chars = Some(n);
            }
            if let Some(n) = section.max_candidates {
                self.max_candidates = Some(n);
            }
        }
        self
    }

    /// Compile patterns, validate limits and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ConfigError> {
        let defaults = ParsingConfig::default();

        let nonzero = |field: &'static str, value: Option<usize>, default: usize| {
            match value {
                Some(0) => Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than zero".to_string(),
                }),
                Some(n) => Ok(n),
                None => Ok(default),
            }
        };

        Ok(ParsingConfig {
            segment_separator_re: self
                .segment_separator_re
                .map(|p| Regex::new(&p))
                .transpose()?,
            min_segment_chars: self.min_segment_chars.unwrap_or(defaults.min_segment_chars),
            max_candidates: nonzero("max_candidates", self.max_candidates, defaults.max_candidates)?,
            max_title_chars: nonzero(
                "max_title_chars",
                self.max_title_chars,
                defaults.max_title_chars,
            )?,
            categories: self.categories,
            tag_vocabulary: self.tag_vocabulary,
            max_tags: self.max_tags.unwrap_or(defaults.max_tags),
            expand_ligatures: self.expand_ligatures.unwrap_or(defaults.expand_ligatures),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.min_segment_chars, 50);
        assert_eq!(config.max_candidates, 50);
        assert_eq!(config.max_title_chars, 150);
        assert_eq!(config.max_tags, 5);
        assert!(!config.expand_ligatures);
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new()
            .min_segment_chars(20)
            .max_candidates(5)
            .max_tags(3)
            .build()
            .unwrap();
        assert_eq!(config.min_segment_chars(), 20);
        assert_eq!(config.max_candidates(), 5);
        assert_eq!(config.max_tags, 3);
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new()
            .segment_separator_regex(r"[invalid")
            .build();
        assert!(matches!(result, Err(ConfigError::Regex(_))));
    }

    #[test]
    fn test_builder_rejects_zero_cap() {
        let result = ParsingConfigBuilder::new().max_candidates(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "max_candidates",
                ..
            })
        ));
    }

    #[test]
    fn test_add_category_extends() {
        let config = ParsingConfigBuilder::new()
            .add_category(CategoryRule::new("Arts", &["Music", "theatre"]))
            .build()
            .unwrap();
        match &config.categories {
            ListOverride::Extend(v) => {
                assert_eq!(v[0].name, "Arts");
                assert_eq!(v[0].keywords, vec!["music", "theatre"]);
            }
            other => panic!("expected Extend, got {other:?}"),
        }
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_file_section_overrides() {
        let section = ParsingSection {
            min_segment_chars: Some(20),
            max_candidates: None,
        };
        let config = ParsingConfigBuilder::new()
            .max_candidates(7)
            .with_file_section(Some(&section))
            .build()
            .unwrap();
        assert_eq!(config.min_segment_chars(), 20);
        assert_eq!(config.max_candidates(), 7);

        let zero = ParsingSection {
            min_segment_chars: None,
            max_candidates: Some(0),
        };
        assert!(ParsingConfigBuilder::new()
            .with_file_section(Some(&zero))
            .build()
            .is_err());
    }
}
