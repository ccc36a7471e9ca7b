//! In-process article store.

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use newsdesk_core::{
    Article, ArticleOrder, ArticleQuery, ArticleRepository, ArticleStatus, Counter, NewArticle,
    Page, RepositoryError,
};

use crate::StoreError;

#[derive(Default)]
struct State {
    articles: Vec<Article>,
    next_id: i64,
}

/// [`ArticleRepository`] that keeps rows in a vector behind a lock.
///
/// Owned by whoever constructs it; nothing is shared between instances.
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored articles, regardless of status.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.articles.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }
}

fn matches_query(article: &Article, query: &ArticleQuery, search: Option<&str>) -> bool {
    if query.status.is_some_and(|s| article.status != s) {
        return false;
    }
    if query.category_filter().is_some_and(|c| article.category != c) {
        return false;
    }
    if query.featured_only && !article.featured {
        return false;
    }
    match search {
        Some(term) => {
            article.title.to_lowercase().contains(term)
                || article.summary.to_lowercase().contains(term)
                || article.tags.iter().any(|t| t.to_lowercase().contains(term))
        }
        None => true,
    }
}

fn compare(order: ArticleOrder, a: &Article, b: &Article) -> Ordering {
    let primary = match order {
        ArticleOrder::Editorial => b
            .featured
            .cmp(&a.featured)
            .then(b.priority.cmp(&a.priority))
            .then(b.publish_date.cmp(&a.publish_date)),
        ArticleOrder::Newest => b.created_at.cmp(&a.created_at),
        ArticleOrder::Trending => b
            .views
            .cmp(&a.views)
            .then(b.likes.cmp(&a.likes))
            .then(b.shares.cmp(&a.shares)),
        ArticleOrder::FeaturedRank => b
            .priority
            .cmp(&a.priority)
            .then(b.publish_date.cmp(&a.publish_date)),
    };
    primary.then(b.id.cmp(&a.id))
}

impl ArticleRepository for MemoryRepository {
    fn list(&self, query: &ArticleQuery) -> Result<Page<Article>, RepositoryError> {
        let state = self.read()?;
        let search = query.search_term().map(str::to_lowercase);
        let mut matching: Vec<&Article> = state
            .articles
            .iter()
            .filter(|a| matches_query(a, query, search.as_deref()))
            .collect();
        matching.sort_by(|a, b| compare(query.order, a, b));

        let pagination = query.pagination;
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let articles = matching
            .iter()
            .skip(offset)
            .take(pagination.limit() as usize)
            .map(|a| (*a).clone())
            .collect();
        Ok(Page::new(articles, matching.len() as u64, pagination))
    }

    fn get_by_slug(
        &self,
        slug: &str,
        status: Option<ArticleStatus>,
    ) -> Result<Option<Article>, RepositoryError> {
        let state = self.read()?;
        Ok(state
            .articles
            .iter()
            .find(|a| a.slug == slug && status.is_none_or(|s| a.status == s))
            .cloned())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        let state = self.read()?;
        Ok(state.articles.iter().find(|a| a.id == id).cloned())
    }

    fn create(&self, article: NewArticle, slug: &str) -> Result<Article, RepositoryError> {
        let mut state = self.write()?;
        if state.articles.iter().any(|a| a.slug == slug) {
            return Err(RepositoryError::DuplicateSlug(slug.to_string()));
        }
        state.next_id += 1;
        let article = article.into_article(state.next_id, slug.to_string(), Utc::now());
        state.articles.push(article.clone());
        Ok(article)
    }

    fn update_status(
        &self,
        id: i64,
        status: ArticleStatus,
    ) -> Result<Option<Article>, RepositoryError> {
        let mut state = self.write()?;
        Ok(state.articles.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    fn increment_counter(
        &self,
        slug: &str,
        counter: Counter,
    ) -> Result<Option<Article>, RepositoryError> {
        let mut state = self.write()?;
        Ok(state.articles.iter_mut().find(|a| a.slug == slug).map(|a| {
            match counter {
                Counter::Views => a.views += 1,
                Counter::Likes => a.likes += 1,
                Counter::Shares => a.shares += 1,
            }
            a.clone()
        }))
    }

    fn find_by_title_fragment(&self, fragment: &str) -> Result<Option<Article>, RepositoryError> {
        let state = self.read()?;
        let needle = fragment.to_lowercase();
        Ok(state
            .articles
            .iter()
            .find(|a| a.title.to_lowercase().contains(&needle))
            .cloned())
    }

    fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.write()?;
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        Ok(state.articles.len() < before)
    }
}
