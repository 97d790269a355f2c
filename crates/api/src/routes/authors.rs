//! Handlers for author listing, lookup, random draws, and author of the day.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use quotd_core::error::CoreError;
use quotd_core::ordering::{AuthorOrdering, QuoteOrdering};
use quotd_core::search::clamp_max_items;
use quotd_core::types::{DbId, ItemKind, Language};
use quotd_db::models::author::{Author, AuthorDetailParams, AuthorListParams, RandomAuthorParams};
use quotd_db::models::day_of::{DayOfHistoryParams, DayOfParams};
use quotd_db::models::quote::QuoteWithAuthor;
use quotd_db::repositories::popularity_repo::{APPEARANCE_INCREMENT, DIRECT_FETCH_INCREMENT};
use quotd_db::repositories::{day_of_repo, AuthorRepo, DayOfRepo, QuoteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::parse_date;
use crate::response::DataResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors))
        .route("/random", get(random_author))
        .route("/aod", get(author_of_day))
        .route("/aod/history", get(author_of_day_history))
        .route("/{id}", get(get_author))
}

/// An author together with a bounded sample of their quotes.
#[derive(Debug, Serialize)]
struct AuthorWithQuotes {
    #[serde(flatten)]
    author: Author,
    quotes: Vec<QuoteWithAuthor>,
}

/// GET /api/v1/authors
async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<AuthorListParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let order = AuthorOrdering::parse(params.order_by.as_deref());

    let authors = AuthorRepo::list(
        &state.pool,
        lang,
        order,
        params.reverse,
        params.page,
        params.page_size,
    )
    .await?;

    let ids: Vec<DbId> = authors.iter().map(|a| a.id).collect();
    state
        .popularity
        .record(ItemKind::Author, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: authors }))
}

/// GET /api/v1/authors/{id}
///
/// Author plus up to `max_items` of their quotes; applies the larger
/// popularity increment to the author, the appearance increment to the
/// quotes shown.
async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<AuthorDetailParams>,
) -> AppResult<impl IntoResponse> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;

    let quotes = QuoteRepo::list(
        &state.pool,
        Language::Any,
        Some(author.id),
        None,
        QuoteOrdering::Popularity,
        false,
        Some(0),
        Some(clamp_max_items(params.max_items)),
    )
    .await?;

    state
        .popularity
        .record(ItemKind::Author, vec![author.id], DIRECT_FETCH_INCREMENT);
    let quote_ids: Vec<DbId> = quotes.iter().map(|q| q.id).collect();
    state
        .popularity
        .record(ItemKind::Quote, quote_ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse {
        data: AuthorWithQuotes { author, quotes },
    }))
}

/// GET /api/v1/authors/random
async fn random_author(
    State(state): State<AppState>,
    Query(params): Query<RandomAuthorParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;

    let author = AuthorRepo::random(&state.pool, lang, params.q.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NoCandidates { entity: "Author" }))?;

    state
        .popularity
        .record(ItemKind::Author, vec![author.id], APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: author }))
}

/// GET /api/v1/authors/aod
async fn author_of_day(
    State(state): State<AppState>,
    Query(params): Query<DayOfParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let date = parse_date(params.date.as_deref())?.unwrap_or_else(day_of_repo::today);

    let aod = DayOfRepo::author_of_day(&state.pool, date, lang)
        .await?
        .ok_or(AppError::Core(CoreError::NoCandidates { entity: "Author" }))?;

    state
        .popularity
        .record(ItemKind::Author, vec![aod.id], APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: aod }))
}

/// GET /api/v1/authors/aod/history
async fn author_of_day_history(
    State(state): State<AppState>,
    Query(params): Query<DayOfHistoryParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let min_date =
        parse_date(params.minimum.as_deref())?.unwrap_or_else(day_of_repo::history_epoch);

    let history = DayOfRepo::author_of_day_history(&state.pool, min_date, lang).await?;
    // Empty after the generation attempt means no eligible candidate existed.
    if history.is_empty() {
        return Err(AppError::Core(CoreError::NoCandidates { entity: "Author" }));
    }

    let ids: Vec<DbId> = history.iter().map(|a| a.id).collect();
    state
        .popularity
        .record(ItemKind::Author, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: history }))
}
