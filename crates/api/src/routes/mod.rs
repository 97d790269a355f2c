//! Route modules. Each provides a `router()` returning its sub-router;
//! `api_routes` assembles everything mounted under `/api/v1`.

use axum::Router;

use crate::state::AppState;

pub mod authors;
pub mod health;
pub mod quotes;
pub mod search;
pub mod topics;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/quotes", quotes::router())
        .nest("/authors", authors::router())
        .nest("/topics", topics::router())
        .nest("/search", search::router())
}
