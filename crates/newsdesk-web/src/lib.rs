//! REST surface of the newsdesk article catalog.
//!
//! Public routes live under `/api/news`; admin routes (listing by status,
//! PDF upload, status changes, deletion) under `/api/admin/news`.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod upload;

pub use state::AppState;

/// Build the application router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/", get(handlers::news::list).post(handlers::news::create))
        .route("/featured", get(handlers::news::featured))
        .route("/trending", get(handlers::news::trending))
        .route("/categories", get(handlers::news::categories))
        .route("/{slug}", get(handlers::news::get))
        .route("/{slug}/like", post(handlers::news::like))
        .route("/{slug}/share", post(handlers::news::share));

    let admin = Router::new()
        .route("/", get(handlers::admin::list))
        .route("/upload-pdf", post(handlers::admin::upload_pdf))
        .route("/{id}/status", patch(handlers::admin::update_status))
        .route("/{id}", axum::routing::delete(handlers::admin::delete));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/news", public)
        .nest("/api/admin/news", admin)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
