//! Repository for author listing, lookup, and random selection.

use quotd_core::ordering::AuthorOrdering;
use quotd_core::search::{
    accept_probability, clamp_page, clamp_page_size, page_window, MIN_NAME_SIMILARITY,
};
use quotd_core::types::{DbId, Language};
use sqlx::PgPool;

use crate::models::author::Author;
use crate::repositories::quote_repo::estimated_rows;

/// Column list for `authors` queries (alias `a`).
pub(crate) const AUTHOR_COLUMNS: &str =
    "a.id, a.name, a.count, a.number_of_english_quotes, a.number_of_icelandic_quotes";

/// Language predicate for authors. Authors have no per-row language flag;
/// scope is derived from their per-language quote counts.
pub(crate) const AUTHOR_LANGUAGE_PREDICATE: &str = "($1::BOOL IS NULL \
     OR ($1 AND a.number_of_icelandic_quotes > 0) \
     OR (NOT $1 AND a.number_of_english_quotes > 0))";

/// Provides read operations over authors.
pub struct AuthorRepo;

impl AuthorRepo {
    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// List authors under the given language scope, ordered and paginated.
    pub async fn list(
        pool: &PgPool,
        lang: Language,
        order: AuthorOrdering,
        reverse: bool,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<Author>, sqlx::Error> {
        let (limit, offset) = page_window(clamp_page(page), clamp_page_size(page_size));
        let order_clause = order_clause(order, reverse);

        let sql = format!(
            "SELECT {AUTHOR_COLUMNS} \
             FROM authors a \
             WHERE {AUTHOR_LANGUAGE_PREDICATE} \
             ORDER BY {order_clause} \
             LIMIT $2 OFFSET $3"
        );

        sqlx::query_as::<_, Author>(&sql)
            .bind(lang.icelandic_flag())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a single author by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!("SELECT {AUTHOR_COLUMNS} FROM authors a WHERE a.id = $1");

        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a single author by case-insensitive exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors a \
             WHERE LOWER(a.name) = LOWER($1) \
             ORDER BY a.id DESC \
             LIMIT 1"
        );

        sqlx::query_as::<_, Author>(&sql)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Random selection
    // -----------------------------------------------------------------------

    /// Draw one author uniformly at random under the active filters.
    ///
    /// Same strategy as `QuoteRepo::random`: probabilistic pre-accept on the
    /// unfiltered corpus, full scan when a fuzzy name filter narrows the
    /// candidate set, one full-scan fallback on an empty pre-filtered draw.
    pub async fn random(
        pool: &PgPool,
        lang: Language,
        search: Option<&str>,
    ) -> Result<Option<Author>, sqlx::Error> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let probability = if search.is_some() {
            1.0
        } else {
            accept_probability(estimated_rows(pool, "authors").await?)
        };

        let row = Self::random_draw(pool, probability, lang, search).await?;
        if row.is_none() && probability < 1.0 {
            return Self::random_draw(pool, 1.0, lang, search).await;
        }
        Ok(row)
    }

    async fn random_draw(
        pool: &PgPool,
        probability: f64,
        lang: Language,
        search: Option<&str>,
    ) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!(
            "SELECT {AUTHOR_COLUMNS} \
             FROM authors a \
             WHERE {AUTHOR_LANGUAGE_PREDICATE} \
               AND ($2::DOUBLE PRECISION >= 1.0 OR random() < $2) \
               AND ($3::TEXT IS NULL OR similarity(a.name, $3) > $4) \
             ORDER BY random() \
             LIMIT 1"
        );

        sqlx::query_as::<_, Author>(&sql)
            .bind(lang.icelandic_flag())
            .bind(probability)
            .bind(search)
            .bind(MIN_NAME_SIMILARITY)
            .fetch_optional(pool)
            .await
    }
}

/// ORDER BY fragment for an author ordering (alias `a`).
fn order_clause(order: AuthorOrdering, reverse: bool) -> &'static str {
    match (order, reverse) {
        (AuthorOrdering::Alphabetical, false) => "a.name ASC, a.id DESC",
        (AuthorOrdering::Alphabetical, true) => "a.name DESC, a.id DESC",
        (AuthorOrdering::Popularity, false) => "a.count DESC, a.id DESC",
        (AuthorOrdering::Popularity, true) => "a.count ASC, a.id DESC",
        (AuthorOrdering::QuoteCount, false) => {
            "(a.number_of_english_quotes + a.number_of_icelandic_quotes) DESC, a.id DESC"
        }
        (AuthorOrdering::QuoteCount, true) => {
            "(a.number_of_english_quotes + a.number_of_icelandic_quotes) ASC, a.id DESC"
        }
    }
}
