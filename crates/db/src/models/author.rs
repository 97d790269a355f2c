//! Author models and list parameter DTOs.

use quotd_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    /// Popularity counter.
    pub count: i64,
    pub number_of_english_quotes: i64,
    pub number_of_icelandic_quotes: i64,
}

/// Query parameters for `GET /authors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorListParams {
    pub lang: Option<String>,
    /// Ordering token: `alphabetical` (default), `popularity`, `nrOfQuotes`.
    pub order_by: Option<String>,
    #[serde(default)]
    pub reverse: bool,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query parameters for `GET /authors/random`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomAuthorParams {
    pub lang: Option<String>,
    /// Optional fuzzy name filter.
    pub q: Option<String>,
}

/// Query parameters for `GET /authors/{id}` (bounds the quote sub-listing).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDetailParams {
    pub max_items: Option<i64>,
}
