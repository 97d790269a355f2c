//! Handlers for topics and their member quotes.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use quotd_core::error::CoreError;
use quotd_core::ordering::QuoteOrdering;
use quotd_core::types::{DbId, ItemKind, Language};
use quotd_db::models::quote::QuoteWithAuthor;
use quotd_db::models::topic::{Topic, TopicDetailParams, TopicListParams};
use quotd_db::repositories::popularity_repo::APPEARANCE_INCREMENT;
use quotd_db::repositories::{QuoteRepo, TopicRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_topics))
        .route("/{id}", get(get_topic))
}

/// A topic together with a page of its member quotes.
#[derive(Debug, Serialize)]
struct TopicWithQuotes {
    #[serde(flatten)]
    topic: Topic,
    quotes: Vec<QuoteWithAuthor>,
}

/// GET /api/v1/topics
async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let lang = Language::parse(params.lang.as_deref())?;
    let topics = TopicRepo::list(&state.pool, lang).await?;

    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/topics/{id}
async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<TopicDetailParams>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id,
        }))?;

    let quotes = QuoteRepo::list(
        &state.pool,
        Language::Any,
        None,
        Some(topic.id),
        QuoteOrdering::QuoteId,
        false,
        params.page,
        params.page_size,
    )
    .await?;

    let quote_ids: Vec<DbId> = quotes.iter().map(|q| q.id).collect();
    state
        .popularity
        .record(ItemKind::Quote, quote_ids, APPEARANCE_INCREMENT);

    Ok(Json(DataResponse {
        data: TopicWithQuotes { topic, quotes },
    }))
}
