//! Handlers for quote listing, lookup, random draws, and quote of the day.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use quotd_core::error::CoreError;
use quotd_core::ordering::QuoteOrdering;
use quotd_core::types::{DbId, ItemKind, Language};
use quotd_db::models::day_of::{DayOfHistoryParams, DayOfParams};
use quotd_db::models::quote::{QuoteListParams, RandomQuoteParams};
use quotd_db::repositories::popularity_repo::{APPEARANCE_INCREMENT, DIRECT_FETCH_INCREMENT};
use quotd_db::repositories::{day_of_repo, AuthorRepo, DayOfRepo, QuoteRepo, TopicRepo};

use crate::error::{AppError, AppResult};
use crate::query::parse_date;
use crate::response::DataResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotes))
        .route("/random", get(random_quote))
        .route("/qod", get(quote_of_day))
        .route("/qod/history", get(quote_of_day_history))
        .route("/{id}", get(get_quote))
}

/// GET /api/v1/quotes
///
/// List quotes under language/author/topic scope, ordered and paginated.
async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let order = QuoteOrdering::parse(params.order_by.as_deref());
    let author_id = resolve_author_scope(&state, params.author_id, params.author.as_deref()).await?;
    let topic_id = resolve_topic_scope(&state, params.topic_id, params.topic.as_deref()).await?;

    let quotes = QuoteRepo::list(
        &state.pool,
        lang,
        author_id,
        topic_id,
        order,
        params.reverse,
        params.page,
        params.page_size,
    )
    .await?;

    let ids: Vec<DbId> = quotes.iter().map(|q| q.id).collect();
    state
        .popularity
        .record(ItemKind::Quote, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: quotes }))
}

/// GET /api/v1/quotes/{id}
///
/// Direct fetch by id; applies the larger popularity increment.
async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quote = QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id,
        }))?;

    state
        .popularity
        .record(ItemKind::Quote, vec![quote.id], DIRECT_FETCH_INCREMENT);

    Ok(Json(DataResponse { data: quote }))
}

/// GET /api/v1/quotes/random
async fn random_quote(
    State(state): State<AppState>,
    Query(params): Query<RandomQuoteParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    // Zero ids mean "no constraint", never "match nothing".
    let author_id = params.author_id.filter(|&id| id != 0);
    let topic_id = params.topic_id.filter(|&id| id != 0);

    let quote = QuoteRepo::random(
        &state.pool,
        lang,
        author_id,
        topic_id,
        params.q.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NoCandidates { entity: "Quote" }))?;

    state
        .popularity
        .record(ItemKind::Quote, vec![quote.id], APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: quote }))
}

/// GET /api/v1/quotes/qod
///
/// Quote of the day for the requested date (default today). Today's entry
/// is generated lazily on first read.
async fn quote_of_day(
    State(state): State<AppState>,
    Query(params): Query<DayOfParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let date = parse_date(params.date.as_deref())?.unwrap_or_else(day_of_repo::today);

    let qod = DayOfRepo::quote_of_day(&state.pool, date, lang)
        .await?
        .ok_or(AppError::Core(CoreError::NoCandidates { entity: "Quote" }))?;

    state
        .popularity
        .record(ItemKind::Quote, vec![qod.id], APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: qod }))
}

/// GET /api/v1/quotes/qod/history
async fn quote_of_day_history(
    State(state): State<AppState>,
    Query(params): Query<DayOfHistoryParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let min_date =
        parse_date(params.minimum.as_deref())?.unwrap_or_else(day_of_repo::history_epoch);

    let history = DayOfRepo::quote_of_day_history(&state.pool, min_date, lang).await?;
    // Empty after the generation attempt means no eligible candidate existed.
    if history.is_empty() {
        return Err(AppError::Core(CoreError::NoCandidates { entity: "Quote" }));
    }

    let ids: Vec<DbId> = history.iter().map(|q| q.id).collect();
    state
        .popularity
        .record(ItemKind::Quote, ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse { data: history }))
}

// ---------------------------------------------------------------------------
// Scope resolution
// ---------------------------------------------------------------------------

/// Resolve author scope: id wins; a non-empty name is looked up
/// case-insensitively and must exist. Empty/zero values mean "no constraint".
pub(crate) async fn resolve_author_scope(
    state: &AppState,
    author_id: Option<DbId>,
    author_name: Option<&str>,
) -> AppResult<Option<DbId>> {
    if let Some(id) = author_id.filter(|&id| id != 0) {
        return Ok(Some(id));
    }
    let Some(name) = author_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let author = AuthorRepo::find_by_name(&state.pool, name).await?.ok_or(
        AppError::Core(CoreError::NotFoundNamed {
            entity: "Author",
            name: name.to_string(),
        }),
    )?;
    Ok(Some(author.id))
}

/// Resolve topic scope with the same id-then-name precedence.
pub(crate) async fn resolve_topic_scope(
    state: &AppState,
    topic_id: Option<DbId>,
    topic_name: Option<&str>,
) -> AppResult<Option<DbId>> {
    if let Some(id) = topic_id.filter(|&id| id != 0) {
        return Ok(Some(id));
    }
    let Some(name) = topic_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let topic = TopicRepo::find_by_name(&state.pool, name).await?.ok_or(
        AppError::Core(CoreError::NotFoundNamed {
            entity: "Topic",
            name: name.to_string(),
        }),
    )?;
    Ok(Some(topic.id))
}
