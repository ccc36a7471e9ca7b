//! Keyword-based category and tag assignment.
//!
//! Both classifiers are plain case-folded substring tests. The category
//! table is ordered: the first category with any matching keyword wins, so
//! reordering it changes results for text that matches several categories.

use once_cell::sync::Lazy;

use crate::config::{CategoryRule, ParsingConfig};

/// Category assigned when no keyword matches.
pub const GENERAL_CATEGORY: &str = "General";

const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "tech",
            "ai",
            "artificial intelligence",
            "software",
            "digital",
            "cyber",
            "app",
            "platform",
            "innovation",
        ],
    ),
    (
        "Education",
        &[
            "school",
            "university",
            "college",
            "student",
            "learn",
            "education",
            "academic",
            "study",
            "course",
            "exam",
        ],
    ),
    (
        "Career",
        &[
            "job",
            "career",
            "employment",
            "internship",
            "hiring",
            "work",
            "professional",
            "salary",
            "interview",
        ],
    ),
    (
        "Scholarship",
        &[
            "scholarship",
            "grant",
            "funding",
            "financial aid",
            "award",
            "fellowship",
            "bursary",
        ],
    ),
    (
        "Research",
        &[
            "research",
            "study",
            "analysis",
            "discovery",
            "investigation",
            "findings",
            "publication",
        ],
    ),
    (
        "Sports",
        &[
            "sport",
            "game",
            "match",
            "tournament",
            "championship",
            "athlete",
            "team",
            "competition",
        ],
    ),
    (
        "Health",
        &[
            "health",
            "medical",
            "wellness",
            "fitness",
            "mental health",
            "healthcare",
            "medicine",
        ],
    ),
    (
        "Science",
        &[
            "science",
            "scientific",
            "experiment",
            "laboratory",
            "biology",
            "chemistry",
            "physics",
        ],
    ),
];

const TAG_VOCABULARY: &[&str] = &[
    "breaking",
    "trending",
    "important",
    "urgent",
    "update",
    "new",
    "latest",
    "technology",
    "education",
    "career",
    "scholarship",
    "research",
    "sports",
    "health",
    "science",
    "innovation",
    "study",
    "student",
    "university",
    "college",
    "academic",
    "professional",
    "development",
    "opportunity",
];

/// The built-in category table, in precedence order.
pub static DEFAULT_CATEGORIES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    CATEGORY_TABLE
        .iter()
        .map(|(name, keywords)| CategoryRule::new(*name, keywords))
        .collect()
});

/// The built-in tag vocabulary, in output order.
pub static DEFAULT_TAGS: Lazy<Vec<String>> =
    Lazy::new(|| TAG_VOCABULARY.iter().map(|t| t.to_string()).collect());

/// Category names a classifier can return, ending with [`GENERAL_CATEGORY`].
pub fn category_names() -> Vec<&'static str> {
    CATEGORY_TABLE
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(GENERAL_CATEGORY))
        .collect()
}

/// Pick a category for `content` using the built-in table.
pub fn determine_category(content: &str) -> String {
    determine_category_in(&content.to_lowercase(), &DEFAULT_CATEGORIES)
}

/// Pick a category for already case-folded text.
pub(crate) fn determine_category_in(lowered: &str, rules: &[CategoryRule]) -> String {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|rule| rule.name.clone())
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
}

/// Tags from the built-in vocabulary found in `content`, at most five.
pub fn extract_tags(content: &str) -> Vec<String> {
    extract_tags_in(
        &content.to_lowercase(),
        &DEFAULT_TAGS,
        ParsingConfig::default().max_tags,
    )
}

/// Vocabulary-ordered tags found in already case-folded text.
pub(crate) fn extract_tags_in(lowered: &str, vocabulary: &[String], max_tags: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for tag in vocabulary {
        if found.len() == max_tags {
            break;
        }
        let tag = tag.to_lowercase();
        if lowered.contains(tag.as_str()) && !found.contains(&tag) {
            found.push(tag);
        }
    }
    found
}
