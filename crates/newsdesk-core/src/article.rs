use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byline used when a creation payload does not name an author.
pub const DEFAULT_AUTHOR: &str = "Editorial Team";

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::Published => "PUBLISHED",
            ArticleStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown article status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ArticleStatus {
    type Err = ParseStatusError;

    /// Case-insensitive: `"draft"`, `"Draft"` and `"DRAFT"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(ArticleStatus::Draft),
            "PUBLISHED" => Ok(ArticleStatus::Published),
            "ARCHIVED" => Ok(ArticleStatus::Archived),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Engagement counters that readers can bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Likes,
    Shares,
}

impl Counter {
    /// Column name in the articles table.
    pub fn column(&self) -> &'static str {
        match self {
            Counter::Views => "views",
            Counter::Likes => "likes",
            Counter::Shares => "shares",
        }
    }
}

/// A persisted news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub summary: String,
    pub full_content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub publish_date: DateTime<Utc>,
    /// Estimated reading time in minutes.
    pub read_time: u32,
    pub featured: bool,
    /// Editorial priority, 1 (lowest) to 5 (highest).
    pub priority: u8,
    pub image_url: Option<String>,
    /// Name of the uploaded PDF this article was imported from.
    pub pdf_file: Option<String>,
    pub source_link: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an article. The slug is chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub summary: String,
    pub full_content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub source_link: Option<String>,
    #[serde(default)]
    pub status: Option<ArticleStatus>,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl NewArticle {
    /// A minimal payload with every optional field at its default.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        full_content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            summary: summary.into(),
            full_content: full_content.into(),
            category: default_category(),
            tags: Vec::new(),
            author: default_author(),
            publish_date: None,
            read_time: None,
            featured: false,
            priority: None,
            image_url: None,
            pdf_file: None,
            source_link: None,
            status: None,
        }
    }

    /// Materialize the payload into a full [`Article`] row.
    ///
    /// Applies the column defaults: 5-minute read time, priority 3 (clamped
    /// to 1..=5), zero counters, `Published` status, and `now` for every
    /// unset timestamp.
    pub fn into_article(self, id: i64, slug: String, now: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            slug,
            subtitle: self.subtitle,
            summary: self.summary,
            full_content: self.full_content,
            category: self.category,
            tags: self.tags,
            author: self.author,
            publish_date: self.publish_date.unwrap_or(now),
            read_time: self.read_time.unwrap_or(5),
            featured: self.featured,
            priority: self.priority.unwrap_or(3).clamp(1, 5),
            image_url: self.image_url,
            pdf_file: self.pdf_file,
            source_link: self.source_link,
            views: 0,
            likes: 0,
            shares: 0,
            status: self.status.unwrap_or(ArticleStatus::Published),
            created_at: now,
            updated_at: now,
        }
    }
}
