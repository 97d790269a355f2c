//! Repository for quote listing, lookup, and random selection.

use quotd_core::ordering::QuoteOrdering;
use quotd_core::search::{accept_probability, build_ranking_queries, clamp_page, clamp_page_size, page_window};
use quotd_core::types::{DbId, Language};
use sqlx::PgPool;

use crate::models::quote::QuoteWithAuthor;

/// Column list for quote projections (alias `q` = quotes, `a` = authors).
pub(crate) const QUOTE_COLUMNS: &str =
    "q.id, q.author_id, a.name, q.quote, q.is_icelandic, q.count";

/// Provides read operations over the quote corpus.
pub struct QuoteRepo;

impl QuoteRepo {
    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// List quotes under the given filters, ordered and paginated.
    ///
    /// Every ordering ends in an id tie-break so repeated identical calls
    /// return identical pages.
    pub async fn list(
        pool: &PgPool,
        lang: Language,
        author_id: Option<DbId>,
        topic_id: Option<DbId>,
        order: QuoteOrdering,
        reverse: bool,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<QuoteWithAuthor>, sqlx::Error> {
        let (limit, offset) = page_window(clamp_page(page), clamp_page_size(page_size));
        let order_clause = order_clause(order, reverse);

        let sql = format!(
            "SELECT {QUOTE_COLUMNS} \
             FROM quotes q \
             JOIN authors a ON a.id = q.author_id \
             WHERE ($1::BOOL IS NULL OR q.is_icelandic = $1) \
               AND ($2::BIGINT IS NULL OR q.author_id = $2) \
               AND ($3::BIGINT IS NULL OR EXISTS ( \
                       SELECT 1 FROM topic_quotes tq \
                       WHERE tq.quote_id = q.id AND tq.topic_id = $3)) \
             ORDER BY {order_clause} \
             LIMIT $4 OFFSET $5"
        );

        sqlx::query_as::<_, QuoteWithAuthor>(&sql)
            .bind(lang.icelandic_flag())
            .bind(author_id)
            .bind(topic_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a single quote by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuoteWithAuthor>, sqlx::Error> {
        let sql = format!(
            "SELECT {QUOTE_COLUMNS} \
             FROM quotes q \
             JOIN authors a ON a.id = q.author_id \
             WHERE q.id = $1"
        );

        sqlx::query_as::<_, QuoteWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Random selection
    // -----------------------------------------------------------------------

    /// Draw one quote uniformly at random under the active filters.
    ///
    /// On an unfiltered draw, rows are pre-accepted with a probability
    /// derived from the planner's row estimate before the final
    /// `ORDER BY random() LIMIT 1`, avoiding a full-corpus shuffle. Any
    /// narrowing filter (author, topic, search text) disables the
    /// pre-accept, since pre-filtering a small candidate set risks an empty
    /// draw. A pre-filtered draw that comes back empty falls back to one
    /// full scan before reporting `None`.
    pub async fn random(
        pool: &PgPool,
        lang: Language,
        author_id: Option<DbId>,
        topic_id: Option<DbId>,
        search: Option<&str>,
    ) -> Result<Option<QuoteWithAuthor>, sqlx::Error> {
        let general_query = search
            .and_then(build_ranking_queries)
            .map(|ranking| ranking.general);

        let narrowed = author_id.is_some() || topic_id.is_some() || general_query.is_some();
        let probability = if narrowed {
            1.0
        } else {
            accept_probability(estimated_rows(pool, "quotes").await?)
        };

        let row = Self::random_draw(
            pool,
            probability,
            lang,
            author_id,
            topic_id,
            general_query.as_deref(),
        )
        .await?;

        if row.is_none() && probability < 1.0 {
            return Self::random_draw(pool, 1.0, lang, author_id, topic_id, None).await;
        }
        Ok(row)
    }

    async fn random_draw(
        pool: &PgPool,
        probability: f64,
        lang: Language,
        author_id: Option<DbId>,
        topic_id: Option<DbId>,
        general_query: Option<&str>,
    ) -> Result<Option<QuoteWithAuthor>, sqlx::Error> {
        let sql = format!(
            "SELECT {QUOTE_COLUMNS} \
             FROM quotes q \
             JOIN authors a ON a.id = q.author_id \
             WHERE ($1::DOUBLE PRECISION >= 1.0 OR random() < $1) \
               AND ($2::BOOL IS NULL OR q.is_icelandic = $2) \
               AND ($3::BIGINT IS NULL OR q.author_id = $3) \
               AND ($4::BIGINT IS NULL OR EXISTS ( \
                       SELECT 1 FROM topic_quotes tq \
                       WHERE tq.quote_id = q.id AND tq.topic_id = $4)) \
               AND ($5::TEXT IS NULL OR q.quote_tsv @@ to_tsquery('english', $5)) \
             ORDER BY random() \
             LIMIT 1"
        );

        sqlx::query_as::<_, QuoteWithAuthor>(&sql)
            .bind(probability)
            .bind(lang.icelandic_flag())
            .bind(author_id)
            .bind(topic_id)
            .bind(general_query)
            .fetch_optional(pool)
            .await
    }
}

/// Planner row estimate for a table (0 when unanalyzed or unknown).
pub(crate) async fn estimated_rows(pool: &PgPool, table: &str) -> Result<i64, sqlx::Error> {
    let estimate = sqlx::query_scalar::<_, i64>(
        "SELECT GREATEST(reltuples, 0)::BIGINT FROM pg_class WHERE relname = $1",
    )
    .bind(table)
    .fetch_optional(pool)
    .await?;
    Ok(estimate.unwrap_or(0))
}

/// ORDER BY fragment for a quote ordering (aliases `q`, `a`).
fn order_clause(order: QuoteOrdering, reverse: bool) -> &'static str {
    match (order, reverse) {
        (QuoteOrdering::QuoteId, false) => "q.id DESC",
        (QuoteOrdering::QuoteId, true) => "q.id ASC",
        (QuoteOrdering::Popularity, false) => "q.count DESC, q.id DESC",
        (QuoteOrdering::Popularity, true) => "q.count ASC, q.id DESC",
        (QuoteOrdering::Length, false) => "LENGTH(q.quote) ASC, q.id DESC",
        (QuoteOrdering::Length, true) => "LENGTH(q.quote) DESC, q.id DESC",
    }
}
