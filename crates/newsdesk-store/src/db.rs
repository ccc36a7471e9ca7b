//! SQLite schema and row mapping for the articles table.

use chrono::{DateTime, SecondsFormat, Utc};
use newsdesk_core::tags::{decode_tags, encode_tags};
use newsdesk_core::{Article, ArticleOrder, ArticleQuery, ArticleStatus, NewArticle};
use rusqlite::types::Value;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Row, named_params};

use crate::StoreError;

/// Columns selected for every [`Article`] read, in [`RawArticle::from_row`] order.
pub const ARTICLE_COLUMNS: &str = "id, title, slug, subtitle, summary, full_content, category, \
     tags, author, publish_date, read_time, featured, priority, image_url, pdf_file, \
     source_link, views, likes, shares, status, created_at, updated_at";

/// Initialize the database with the required schema.
/// Sets WAL mode and NORMAL synchronous for file-backed databases.
pub fn init_database(conn: &Connection) -> Result<(), StoreError> {
    register_functions(conn)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            slug TEXT UNIQUE NOT NULL,
            subtitle TEXT,
            summary TEXT NOT NULL,
            full_content TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'General',
            tags TEXT NOT NULL DEFAULT '[]',
            author TEXT NOT NULL,
            publish_date TEXT NOT NULL,
            read_time INTEGER NOT NULL DEFAULT 5,
            featured INTEGER NOT NULL DEFAULT 0,
            priority INTEGER NOT NULL DEFAULT 3,
            image_url TEXT,
            pdf_file TEXT,
            source_link TEXT,
            views INTEGER NOT NULL DEFAULT 0,
            likes INTEGER NOT NULL DEFAULT 0,
            shares INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'PUBLISHED',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_articles_status ON articles(status);
        CREATE INDEX IF NOT EXISTS idx_articles_category ON articles(category);
        "#,
    )?;

    Ok(())
}

/// Register `unicode_lower(text)`. SQLite's own `LIKE` and `lower()` only
/// fold ASCII letters, so searches compare this against a pattern
/// lowercased in Rust.
pub fn register_functions(conn: &Connection) -> Result<(), StoreError> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(id: i64, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            id,
            reason: format!("bad timestamp {raw:?}: {e}"),
        })
}

/// Insert a materialized row. Returns the new rowid.
pub fn insert_article(
    conn: &Connection,
    article: NewArticle,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<i64, StoreError> {
    let row = article.into_article(0, slug.to_string(), now);
    let mut stmt = conn.prepare_cached(
        "INSERT INTO articles (title, slug, subtitle, summary, full_content, category, tags, \
         author, publish_date, read_time, featured, priority, image_url, pdf_file, source_link, \
         views, likes, shares, status, created_at, updated_at) \
         VALUES (:title, :slug, :subtitle, :summary, :full_content, :category, :tags, :author, \
         :publish_date, :read_time, :featured, :priority, :image_url, :pdf_file, :source_link, \
         0, 0, 0, :status, :created_at, :updated_at)",
    )?;
    stmt.execute(named_params! {
        ":title": row.title,
        ":slug": row.slug,
        ":subtitle": row.subtitle,
        ":summary": row.summary,
        ":full_content": row.full_content,
        ":category": row.category,
        ":tags": encode_tags(&row.tags),
        ":author": row.author,
        ":publish_date": format_timestamp(&row.publish_date),
        ":read_time": row.read_time,
        ":featured": row.featured,
        ":priority": row.priority,
        ":image_url": row.image_url,
        ":pdf_file": row.pdf_file,
        ":source_link": row.source_link,
        ":status": row.status.as_str(),
        ":created_at": format_timestamp(&row.created_at),
        ":updated_at": format_timestamp(&row.updated_at),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Column values as stored, before domain validation.
pub struct RawArticle {
    id: i64,
    title: String,
    slug: String,
    subtitle: Option<String>,
    summary: String,
    full_content: String,
    category: String,
    tags: Option<String>,
    author: String,
    publish_date: String,
    read_time: u32,
    featured: bool,
    priority: u8,
    image_url: Option<String>,
    pdf_file: Option<String>,
    source_link: Option<String>,
    views: u64,
    likes: u64,
    shares: u64,
    status: String,
    created_at: String,
    updated_at: String,
}

impl RawArticle {
    /// Read a row selected with [`ARTICLE_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            subtitle: row.get(3)?,
            summary: row.get(4)?,
            full_content: row.get(5)?,
            category: row.get(6)?,
            tags: row.get(7)?,
            author: row.get(8)?,
            publish_date: row.get(9)?,
            read_time: row.get(10)?,
            featured: row.get(11)?,
            priority: row.get(12)?,
            image_url: row.get(13)?,
            pdf_file: row.get(14)?,
            source_link: row.get(15)?,
            views: row.get(16)?,
            likes: row.get(17)?,
            shares: row.get(18)?,
            status: row.get(19)?,
            created_at: row.get(20)?,
            updated_at: row.get(21)?,
        })
    }

    pub fn into_article(self) -> Result<Article, StoreError> {
        let id = self.id;
        let status: ArticleStatus = self.status.parse().map_err(|e| StoreError::Corrupt {
            id,
            reason: format!("{e}"),
        })?;
        Ok(Article {
            id,
            title: self.title,
            slug: self.slug,
            subtitle: self.subtitle,
            summary: self.summary,
            full_content: self.full_content,
            category: self.category,
            tags: decode_tags(self.tags.as_deref()),
            author: self.author,
            publish_date: parse_timestamp(id, &self.publish_date)?,
            read_time: self.read_time,
            featured: self.featured,
            priority: self.priority,
            image_url: self.image_url,
            pdf_file: self.pdf_file,
            source_link: self.source_link,
            views: self.views,
            likes: self.likes,
            shares: self.shares,
            status,
            created_at: parse_timestamp(id, &self.created_at)?,
            updated_at: parse_timestamp(id, &self.updated_at)?,
        })
    }
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `WHERE` clause and positional parameters for a listing query.
pub fn where_clause(query: &ArticleQuery) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(status) = query.status {
        conditions.push("status = ?".to_string());
        params.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(category) = query.category_filter() {
        conditions.push("category = ?".to_string());
        params.push(Value::Text(category.to_string()));
    }
    if query.featured_only {
        conditions.push("featured = 1".to_string());
    }
    if let Some(term) = query.search_term() {
        conditions.push(
            r"(unicode_lower(title) LIKE ? ESCAPE '\' OR unicode_lower(summary) LIKE ? ESCAPE '\' OR unicode_lower(tags) LIKE ? ESCAPE '\')"
                .to_string(),
        );
        let pattern = like_pattern(&term.to_lowercase());
        for _ in 0..3 {
            params.push(Value::Text(pattern.clone()));
        }
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), params)
    }
}

/// `ORDER BY` clause for a listing order. Ties fall back to newest id.
pub fn order_clause(order: ArticleOrder) -> &'static str {
    match order {
        ArticleOrder::Editorial => "ORDER BY featured DESC, priority DESC, publish_date DESC, id DESC",
        ArticleOrder::Newest => "ORDER BY created_at DESC, id DESC",
        ArticleOrder::Trending => "ORDER BY views DESC, likes DESC, shares DESC, id DESC",
        ArticleOrder::FeaturedRank => "ORDER BY priority DESC, publish_date DESC, id DESC",
    }
}
