//! Error responses for the REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use newsdesk_core::RepositoryError;
use newsdesk_ingest::IngestError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Body of every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Repository(RepositoryError::DuplicateSlug(slug)) => (
                StatusCode::CONFLICT,
                format!("An article with slug {slug} already exists"),
            ),
            ApiError::Ingest(e) => {
                tracing::error!(error = %e, "PDF processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process PDF".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
