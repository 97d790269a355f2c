use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use quotd_api::background::popularity::PopularitySink;
use quotd_api::config::ServerConfig;
use quotd_api::router::build_app_router;
use quotd_api::state::AppState;
use quotd_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The popularity sink runs against
/// the same pool; its cancellation token is leaked for the test's lifetime.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let (popularity, _handle) = PopularitySink::start(pool.clone(), CancellationToken::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        popularity,
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// GET a path and assert the status, returning the parsed body.
pub async fn get_json(app: Router, uri: &str, expected: StatusCode) -> serde_json::Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), expected, "unexpected status for {uri}");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn insert_author(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO authors (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("insert author")
}

pub async fn insert_quote(pool: &PgPool, author_id: DbId, text: &str, icelandic: bool) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO quotes (author_id, quote, is_icelandic) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(author_id)
    .bind(text)
    .bind(icelandic)
    .fetch_one(pool)
    .await
    .expect("insert quote")
}

pub async fn insert_topic(pool: &PgPool, name: &str, icelandic: bool) -> DbId {
    sqlx::query_scalar("INSERT INTO topics (name, is_icelandic) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(icelandic)
        .fetch_one(pool)
        .await
        .expect("insert topic")
}

pub async fn tag_quote(pool: &PgPool, topic_id: DbId, quote_id: DbId) {
    sqlx::query("INSERT INTO topic_quotes (topic_id, quote_id) VALUES ($1, $2)")
        .bind(topic_id)
        .bind(quote_id)
        .execute(pool)
        .await
        .expect("tag quote");
}
