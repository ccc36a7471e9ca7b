use serde::Serialize;

use crate::article::ArticleStatus;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort order for article listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleOrder {
    /// Featured first, then priority, then newest publish date.
    #[default]
    Editorial,
    /// Newest created first (admin listing).
    Newest,
    /// Most viewed, then most liked, then most shared.
    Trending,
    /// Priority, then newest publish date (featured strip).
    FeaturedRank,
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Build a page request, clamping `page` to at least 1 and `limit` to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Like [`Pagination::new`] but falls back to the defaults for missing values.
    pub fn from_params(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self::new(page.unwrap_or(1), limit.unwrap_or(default_limit))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// `ceil(total / limit)`.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 12)
    }
}

/// Statically typed listing filter consumed by repository implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub status: Option<ArticleStatus>,
    /// Exact category match. `"all"` is treated as no filter.
    pub category: Option<String>,
    /// Case-insensitive containment over title, summary and tags.
    pub search: Option<String>,
    pub featured_only: bool,
    pub order: ArticleOrder,
    pub pagination: Pagination,
}

impl ArticleQuery {
    /// Published articles in editorial order.
    pub fn published() -> Self {
        Self {
            status: Some(ArticleStatus::Published),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_order(mut self, order: ArticleOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// The category filter after dropping blanks and the `"all"` sentinel.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    /// The search term after dropping blanks.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One page of results plus the totals needed for pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub articles: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(articles: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            articles,
            total,
            page: pagination.page(),
            total_pages: pagination.total_pages(total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            articles: self.articles.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}
