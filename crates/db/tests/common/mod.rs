//! Shared seed helpers for repository integration tests.

use quotd_core::types::DbId;
use sqlx::PgPool;

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

/// Ids from the standard small mixed-language corpus.
pub struct Corpus {
    pub ali: DbId,
    pub ali_quote: DbId,
    pub stalin: DbId,
    pub stalin_quote: DbId,
    pub einstein: DbId,
    pub einstein_quote: DbId,
    pub laxness: DbId,
    pub laxness_quote: DbId,
}

/// Seed a small corpus covering both languages and the fuzzy-name cases
/// the search tests exercise.
pub async fn seed_corpus(pool: &PgPool) -> Corpus {
    let ali = insert_author(pool, "Muhammad Ali").await;
    let ali_quote = insert_quote(
        pool,
        ali,
        "Float like a butterfly sting like a bee.",
        false,
    )
    .await;

    let stalin = insert_author(pool, "Joseph Stalin").await;
    let stalin_quote = insert_quote(
        pool,
        stalin,
        "Quantity has a quality all its own.",
        false,
    )
    .await;

    let einstein = insert_author(pool, "Albert Einstein").await;
    let einstein_quote = insert_quote(
        pool,
        einstein,
        "Imagination is more important than knowledge.",
        false,
    )
    .await;

    let laxness = insert_author(pool, "Halldor Laxness").await;
    let laxness_quote = insert_quote(
        pool,
        laxness,
        "Timinn og vatnid renna hvort sinn veg.",
        true,
    )
    .await;

    Corpus {
        ali,
        ali_quote,
        stalin,
        stalin_quote,
        einstein,
        einstein_quote,
        laxness,
        laxness_quote,
    }
}
