//! Search result projections and request DTOs.
//!
//! Result rows carry the per-request rank components (plain, phrase,
//! general, name similarity) computed by the ranking query; they exist only
//! for the lifetime of one query and are never persisted.

use quotd_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single ranked row from the combined or quotes-only search.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchResultRow {
    pub quote_id: DbId,
    pub author_id: DbId,
    /// Author display name.
    pub name: String,
    pub quote: String,
    pub is_icelandic: bool,
    /// ts_rank of the unordered AND form.
    pub plain_rank: f32,
    /// ts_rank of the contiguous phrase form.
    pub phrase_rank: f32,
    /// ts_rank of the any-token OR form.
    pub general_rank: f32,
    /// pg_trgm similarity between the query and the author name.
    pub name_similarity: f32,
}

/// A single ranked row from the authors-only search.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorSearchRow {
    pub id: DbId,
    pub name: String,
    pub count: i64,
    pub number_of_english_quotes: i64,
    pub number_of_icelandic_quotes: i64,
    pub name_similarity: f32,
}

/// Query parameters shared by the three search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text search query.
    pub q: Option<String>,
    pub lang: Option<String>,
    /// Restrict quote search to one author's quotes.
    pub author_id: Option<DbId>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
