//! Integration tests for the search endpoints.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get_json, insert_author, insert_quote};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn combined_search_returns_ranked_rows(pool: PgPool) {
    let ali = insert_author(&pool, "Muhammad Ali").await;
    let quote = insert_quote(&pool, ali, "Float like a butterfly sting like a bee.", false).await;
    let app = build_test_app(pool);

    let json = get_json(
        app,
        "/api/v1/search?q=float%20like%20a%20butterfly",
        StatusCode::OK,
    )
    .await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["quote_id"], quote);
    assert_eq!(data[0]["name"], "Muhammad Ali");
    assert!(data[0]["phrase_rank"].as_f64().unwrap() > 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn combined_search_tolerates_author_typos(pool: PgPool) {
    let stalin = insert_author(&pool, "Joseph Stalin").await;
    insert_quote(&pool, stalin, "Quantity has a quality all its own.", false).await;
    let app = build_test_app(pool);

    let json = get_json(app, "/api/v1/search?q=Stalin%20jseph", StatusCode::OK).await;

    let data = json["data"].as_array().unwrap();
    assert!(!data.is_empty());
    assert_eq!(data[0]["author_id"], stalin);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_query_yields_empty_results(pool: PgPool) {
    let author = insert_author(&pool, "Marcus Aurelius").await;
    insert_quote(&pool, author, "The obstacle is the way.", false).await;

    for uri in [
        "/api/v1/search",
        "/api/v1/search?q=%20%20",
        "/api/v1/search/authors?q=",
        "/api/v1/search/quotes?q=%3F%21",
    ] {
        let json = get_json(build_test_app(pool.clone()), uri, StatusCode::OK).await;
        assert_eq!(
            json["data"].as_array().unwrap().len(),
            0,
            "expected empty results for {uri}"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_search_returns_similarity_rows(pool: PgPool) {
    let einstein = insert_author(&pool, "Albert Einstein").await;
    insert_quote(&pool, einstein, "Imagination is more important than knowledge.", false).await;
    let app = build_test_app(pool);

    let json = get_json(app, "/api/v1/search/authors?q=Einstien", StatusCode::OK).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], einstein);
    assert!(data[0]["name_similarity"].as_f64().unwrap() > 0.105);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_search_scopes_to_author(pool: PgPool) {
    let ali = insert_author(&pool, "Muhammad Ali").await;
    let ali_quote = insert_quote(&pool, ali, "Float like a butterfly.", false).await;
    let einstein = insert_author(&pool, "Albert Einstein").await;
    insert_quote(&pool, einstein, "The butterfly effect of knowledge.", false).await;
    let app = build_test_app(pool);

    let json = get_json(
        app,
        &format!("/api/v1/search/quotes?q=butterfly&author_id={ali}"),
        StatusCode::OK,
    )
    .await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["quote_id"], ali_quote);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_search_with_zero_author_id_is_unconstrained(pool: PgPool) {
    let ali = insert_author(&pool, "Muhammad Ali").await;
    insert_quote(&pool, ali, "Float like a butterfly.", false).await;
    let einstein = insert_author(&pool, "Albert Einstein").await;
    insert_quote(&pool, einstein, "The butterfly effect of knowledge.", false).await;
    let app = build_test_app(pool);

    // A zero author id means "no constraint", not "match nothing".
    let json = get_json(
        app,
        "/api/v1/search/quotes?q=butterfly&author_id=0",
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_with_unknown_language_is_400(pool: PgPool) {
    let app = build_test_app(pool);

    let json = get_json(app, "/api/v1/search?q=x&lang=latin", StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
