//! Handlers for relevance-ranked search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use quotd_core::types::{DbId, ItemKind, Language};
use quotd_db::models::search::SearchParams;
use quotd_db::repositories::popularity_repo::APPEARANCE_INCREMENT;
use quotd_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_combined))
        .route("/authors", get(search_authors))
        .route("/quotes", get(search_quotes))
}

/// GET /api/v1/search
///
/// Ranked search across the joined author/quote corpus. An empty query
/// yields an empty result set.
async fn search_combined(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let query = params.q.unwrap_or_default();

    let results =
        SearchRepo::search_combined(&state.pool, &query, lang, params.page, params.page_size)
            .await?;

    tracing::debug!(query = %query, results = results.len(), "Combined search executed");

    let quote_ids: Vec<DbId> = results.iter().map(|r| r.quote_id).collect();
    let author_ids: Vec<DbId> = results.iter().map(|r| r.author_id).collect();
    state
        .popularity
        .record(ItemKind::Quote, quote_ids, APPEARANCE_INCREMENT);
    state
        .popularity
        .record(ItemKind::Author, author_ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/search/authors
async fn search_authors(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let query = params.q.unwrap_or_default();

    let results =
        SearchRepo::search_authors(&state.pool, &query, lang, params.page, params.page_size)
            .await?;

    let ids: Vec<DbId> = results.iter().map(|r| r.id).collect();
    state
        .popularity
        .record(ItemKind::Author, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/search/quotes
async fn search_quotes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let query = params.q.unwrap_or_default();
    // A zero id means "no constraint", never "match nothing".
    let author_id = params.author_id.filter(|&id| id != 0);

    let results = SearchRepo::search_quotes(
        &state.pool,
        &query,
        lang,
        author_id,
        params.page,
        params.page_size,
    )
    .await?;

    let ids: Vec<DbId> = results.iter().map(|r| r.quote_id).collect();
    state
        .popularity
        .record(ItemKind::Quote, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: results }))
}
