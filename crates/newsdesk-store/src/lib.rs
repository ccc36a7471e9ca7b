//! Article storage backends.
//!
//! [`SqliteRepository`] is the production store; [`MemoryRepository`] keeps
//! everything in a vector and backs the web and ingest tests. Both implement
//! [`ArticleRepository`] with identical filtering and ordering.

mod db;
pub mod memory;
mod sqlite;

use newsdesk_core::RepositoryError;
use thiserror::Error;

// Re-export for convenience
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
    #[error("connection lock poisoned")]
    Poisoned,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt { .. } => RepositoryError::Corrupt(err.to_string()),
            other => RepositoryError::Database(other.to_string()),
        }
    }
}
