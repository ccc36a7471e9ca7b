use thiserror::Error;

use crate::article::{Article, ArticleStatus, Counter, NewArticle};
use crate::query::{ArticleQuery, Page};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),
    #[error("slug already exists: {0}")]
    DuplicateSlug(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Storage capability for articles.
///
/// Injected into the web handlers and the ingestion workflow; there is no
/// process-wide article store.
pub trait ArticleRepository: Send + Sync {
    /// List articles matching `query`, one page at a time.
    fn list(&self, query: &ArticleQuery) -> Result<Page<Article>, RepositoryError>;

    /// Look up by slug, optionally requiring a status.
    fn get_by_slug(
        &self,
        slug: &str,
        status: Option<ArticleStatus>,
    ) -> Result<Option<Article>, RepositoryError>;

    fn get_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError>;

    /// Insert a new article under `slug`. Fails with
    /// [`RepositoryError::DuplicateSlug`] if the slug is taken.
    fn create(&self, article: NewArticle, slug: &str) -> Result<Article, RepositoryError>;

    /// Change the status of an article. Returns `None` if `id` is unknown.
    fn update_status(
        &self,
        id: i64,
        status: ArticleStatus,
    ) -> Result<Option<Article>, RepositoryError>;

    /// Add one to a counter. Returns the updated article, or `None` if
    /// `slug` is unknown.
    fn increment_counter(
        &self,
        slug: &str,
        counter: Counter,
    ) -> Result<Option<Article>, RepositoryError>;

    /// First article whose title contains `fragment`, case-insensitively.
    fn find_by_title_fragment(&self, fragment: &str) -> Result<Option<Article>, RepositoryError>;

    /// Remove an article. Returns whether a row was deleted.
    fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
