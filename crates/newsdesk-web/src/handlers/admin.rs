//! Admin endpoints. Mounted under `/api/admin` without an auth layer.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, MultipartRejection};
use axum::extract::{Multipart, Path, Query, State};
use newsdesk_core::{Article, ArticleOrder, ArticleQuery, ArticleStatus, Page, Pagination};
use newsdesk_ingest::IngestReport;

use crate::error::{ApiError, Result};
use crate::models::{AdminListParams, DeleteResponse, StatusUpdate, UploadResponse};
use crate::state::AppState;
use crate::upload::{self, UploadError, UploadedPdf};

/// Default page size of the admin listing.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// `GET /api/admin/news`: every status unless filtered, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminListParams>,
) -> Result<Json<Page<Article>>> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(
            s.parse::<ArticleStatus>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
    };
    let query = ArticleQuery {
        status,
        order: ArticleOrder::Newest,
        pagination: Pagination::from_params(params.page, params.limit, DEFAULT_PAGE_SIZE),
        ..ArticleQuery::default()
    };
    let page = state.with_repo(move |repo| repo.list(&query)).await?;
    Ok(Json(page))
}

/// `POST /api/admin/news/upload-pdf`: extract articles from a PDF and store
/// the new ones as drafts.
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pdf = upload::parse_multipart(multipart)
        .await
        .map_err(|e| match e {
            UploadError::Missing => {
                ApiError::BadRequest("Please upload a valid PDF file".to_string())
            }
            UploadError::Malformed(msg) | UploadError::NotPdf(msg) => ApiError::BadRequest(msg),
        })?;

    tracing::info!(file = %pdf.filename, bytes = pdf.data.len(), "received PDF upload");
    let report = ingest_blocking(state, pdf).await?;

    let errors = (!report.errors.is_empty()).then_some(report.errors.clone());
    Ok(Json(UploadResponse {
        success: true,
        count: report.count(),
        total: report.total,
        errors,
    }))
}

/// Write the upload to a temp file and run extraction plus ingestion on the
/// blocking pool (MuPDF and SQLite are not async).
async fn ingest_blocking(state: Arc<AppState>, pdf: UploadedPdf) -> Result<IngestReport> {
    tokio::task::spawn_blocking(move || -> Result<IngestReport> {
        let temp_dir = tempfile::tempdir()?;
        let pdf_path = temp_dir.path().join("upload.pdf");
        std::fs::write(&pdf_path, &pdf.data)?;
        Ok(newsdesk_ingest::ingest_pdf(
            &pdf_path,
            &pdf.filename,
            state.backend.as_ref(),
            &state.extractor,
            state.repo.as_ref(),
        )?)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("task join error: {e}")))?
}

/// `PATCH /api/admin/news/{id}/status`
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Article>> {
    let Json(update) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let status: ArticleStatus = update
        .status
        .parse()
        .map_err(|e: newsdesk_core::ParseStatusError| ApiError::BadRequest(e.to_string()))?;

    let article = state
        .with_repo(move |repo| repo.update_status(id, status))
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;
    tracing::info!(id, status = %status, "updated article status");
    Ok(Json(article))
}

/// `DELETE /api/admin/news/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    if !state.with_repo(move |repo| repo.delete(id)).await? {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }
    tracing::info!(id, "deleted article");
    Ok(Json(DeleteResponse { success: true }))
}
