use std::sync::Arc;

use newsdesk_core::{ArticleRepository, PdfBackend, RepositoryError};
use newsdesk_parsing::ArticleExtractor;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub repo: Arc<dyn ArticleRepository>,
    pub backend: Arc<dyn PdfBackend>,
    pub extractor: Arc<ArticleExtractor>,
    /// Request body cap, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Run a repository call on the blocking pool.
    pub async fn with_repo<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn ArticleRepository) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || f(repo.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("task join error: {e}")))?
            .map_err(ApiError::from)
    }
}
