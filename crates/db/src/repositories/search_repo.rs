//! Repository for relevance-ranked search.
//!
//! Three entry points over the quote/author corpus, all built from the same
//! ranking signals: plain (AND), phrase (adjacency), and general (OR)
//! tsquery ranks plus pg_trgm name similarity. Every ordering ends in an id
//! tie-break, giving the strict total order that stable pagination requires.

use quotd_core::search::{
    build_ranking_queries, clamp_page, clamp_page_size, page_window, MIN_NAME_SIMILARITY,
};
use quotd_core::types::{DbId, Language};
use sqlx::PgPool;

use crate::models::search::{AuthorSearchRow, SearchResultRow};
use crate::repositories::author_repo::AUTHOR_LANGUAGE_PREDICATE;

/// Rank component projection shared by the quote-bearing searches
/// (aliases `q` = quotes, `a` = authors; $1..$4 = plain, phrase, general,
/// raw query text).
const RANKED_QUOTE_COLUMNS: &str = "\
    q.id AS quote_id, q.author_id, a.name, q.quote, q.is_icelandic, \
    ts_rank(q.quote_tsv, to_tsquery('english', $1)) AS plain_rank, \
    ts_rank(q.quote_tsv, to_tsquery('english', $2)) AS phrase_rank, \
    ts_rank(q.quote_tsv, to_tsquery('english', $3)) AS general_rank, \
    similarity(a.name, $4) AS name_similarity";

/// Provides the three ranked search operations.
pub struct SearchRepo;

impl SearchRepo {
    // -----------------------------------------------------------------------
    // Combined (authors + quotes)
    // -----------------------------------------------------------------------

    /// Search the joined author/quote corpus.
    ///
    /// A row is eligible when any tsquery form matches its text or its
    /// author's name is a fuzzy match. Phrase rank dominates the ordering
    /// (exact wording signals strongest intent), then name similarity,
    /// plain, general, and finally quote id.
    pub async fn search_combined(
        pool: &PgPool,
        query: &str,
        lang: Language,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<SearchResultRow>, sqlx::Error> {
        let ranking = match build_ranking_queries(query) {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };
        let (limit, offset) = page_window(clamp_page(page), clamp_page_size(page_size));

        let sql = format!(
            "SELECT {RANKED_QUOTE_COLUMNS} \
             FROM quotes q \
             JOIN authors a ON a.id = q.author_id \
             WHERE ($5::BOOL IS NULL OR q.is_icelandic = $5) \
               AND (q.quote_tsv @@ to_tsquery('english', $1) \
                    OR q.quote_tsv @@ to_tsquery('english', $2) \
                    OR q.quote_tsv @@ to_tsquery('english', $3) \
                    OR similarity(a.name, $4) > $6) \
             ORDER BY phrase_rank DESC, name_similarity DESC, plain_rank DESC, \
                      general_rank DESC, quote_id DESC \
             LIMIT $7 OFFSET $8"
        );

        sqlx::query_as::<_, SearchResultRow>(&sql)
            .bind(&ranking.plain)
            .bind(&ranking.phrase)
            .bind(&ranking.general)
            .bind(query)
            .bind(lang.icelandic_flag())
            .bind(MIN_NAME_SIMILARITY)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Quotes only
    // -----------------------------------------------------------------------

    /// Search quote text only. Name similarity is reported but plays no part
    /// in eligibility or ordering; plain rank leads instead of phrase.
    pub async fn search_quotes(
        pool: &PgPool,
        query: &str,
        lang: Language,
        author_id: Option<DbId>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<SearchResultRow>, sqlx::Error> {
        let ranking = match build_ranking_queries(query) {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };
        let (limit, offset) = page_window(clamp_page(page), clamp_page_size(page_size));

        let sql = format!(
            "SELECT {RANKED_QUOTE_COLUMNS} \
             FROM quotes q \
             JOIN authors a ON a.id = q.author_id \
             WHERE ($5::BOOL IS NULL OR q.is_icelandic = $5) \
               AND ($6::BIGINT IS NULL OR q.author_id = $6) \
               AND (q.quote_tsv @@ to_tsquery('english', $1) \
                    OR q.quote_tsv @@ to_tsquery('english', $2) \
                    OR q.quote_tsv @@ to_tsquery('english', $3)) \
             ORDER BY plain_rank DESC, phrase_rank DESC, general_rank DESC, quote_id DESC \
             LIMIT $7 OFFSET $8"
        );

        sqlx::query_as::<_, SearchResultRow>(&sql)
            .bind(&ranking.plain)
            .bind(&ranking.phrase)
            .bind(&ranking.general)
            .bind(query)
            .bind(lang.icelandic_flag())
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Authors only
    // -----------------------------------------------------------------------

    /// Search author names only: trigram similarity with a full-text
    /// fallback on the name, ordered by similarity then id.
    pub async fn search_authors(
        pool: &PgPool,
        query: &str,
        lang: Language,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<AuthorSearchRow>, sqlx::Error> {
        let ranking = match build_ranking_queries(query) {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };
        let (limit, offset) = page_window(clamp_page(page), clamp_page_size(page_size));

        let sql = format!(
            "SELECT a.id, a.name, a.count, a.number_of_english_quotes, \
                    a.number_of_icelandic_quotes, \
                    similarity(a.name, $2) AS name_similarity \
             FROM authors a \
             WHERE {AUTHOR_LANGUAGE_PREDICATE} \
               AND (similarity(a.name, $2) > $3 \
                    OR a.name_tsv @@ to_tsquery('english', $4)) \
             ORDER BY name_similarity DESC, a.id DESC \
             LIMIT $5 OFFSET $6"
        );

        sqlx::query_as::<_, AuthorSearchRow>(&sql)
            .bind(lang.icelandic_flag())
            .bind(query)
            .bind(MIN_NAME_SIMILARITY)
            .bind(&ranking.general)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
