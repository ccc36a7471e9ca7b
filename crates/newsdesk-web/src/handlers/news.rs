//! Public catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use newsdesk_core::{
    Article, ArticleOrder, ArticleQuery, ArticleStatus, Counter, NewArticle, Page, Pagination,
    unique_slug,
};

use crate::error::{ApiError, Result};
use crate::models::ListParams;
use crate::state::AppState;

/// Default page size of the public listing.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
const FEATURED_LIMIT: u32 = 3;
const TRENDING_LIMIT: u32 = 5;

/// `GET /api/news`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Article>>> {
    let query = ArticleQuery::published()
        .with_category(params.category)
        .with_search(params.search)
        .with_pagination(Pagination::from_params(
            params.page,
            params.limit,
            DEFAULT_PAGE_SIZE,
        ));
    let page = state.with_repo(move |repo| repo.list(&query)).await?;
    Ok(Json(page))
}

/// `GET /api/news/featured`
pub async fn featured(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Article>>> {
    let query = ArticleQuery::published()
        .featured_only()
        .with_order(ArticleOrder::FeaturedRank)
        .with_pagination(Pagination::new(1, FEATURED_LIMIT));
    let page = state.with_repo(move |repo| repo.list(&query)).await?;
    Ok(Json(page.articles))
}

/// `GET /api/news/trending`
pub async fn trending(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Article>>> {
    let query = ArticleQuery::published()
        .with_order(ArticleOrder::Trending)
        .with_pagination(Pagination::new(1, TRENDING_LIMIT));
    let page = state.with_repo(move |repo| repo.list(&query)).await?;
    Ok(Json(page.articles))
}

/// `GET /api/news/categories`
pub async fn categories() -> Json<Vec<&'static str>> {
    Json(newsdesk_parsing::category_names())
}

/// `GET /api/news/{slug}`: a published article. Counts as one view.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>> {
    let article = state
        .with_repo(move |repo| {
            match repo.get_by_slug(&slug, Some(ArticleStatus::Published))? {
                Some(_) => repo.increment_counter(&slug, Counter::Views),
                None => Ok(None),
            }
        })
        .await?;
    article
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))
}

/// `POST /api/news`: manual creation with a timestamp-suffixed slug.
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>)> {
    let Json(article) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if article.title.trim().is_empty()
        || article.summary.trim().is_empty()
        || article.full_content.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "Title, summary and full content are required".to_string(),
        ));
    }

    let slug = unique_slug(&article.title);
    let created = state
        .with_repo(move |repo| repo.create(article, &slug))
        .await?;
    tracing::info!(id = created.id, slug = %created.slug, "created article");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /api/news/{slug}/like`
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>> {
    bump(&state, slug, Counter::Likes).await
}

/// `POST /api/news/{slug}/share`
pub async fn share(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>> {
    bump(&state, slug, Counter::Shares).await
}

async fn bump(state: &AppState, slug: String, counter: Counter) -> Result<Json<Article>> {
    state
        .with_repo(move |repo| repo.increment_counter(&slug, counter))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))
}
