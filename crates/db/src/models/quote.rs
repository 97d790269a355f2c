//! Quote models and list/random parameter DTOs.

use quotd_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A quote row joined with its author's display name.
///
/// This is the projection every quote-returning endpoint serves; the bare
/// `quotes` row is never exposed without its author.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteWithAuthor {
    pub id: DbId,
    pub author_id: DbId,
    /// Author display name.
    pub name: String,
    pub quote: String,
    pub is_icelandic: bool,
    /// Popularity counter.
    pub count: i64,
}

/// Query parameters for `GET /quotes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteListParams {
    /// Language scope: `english`, `icelandic`, or empty for all.
    pub lang: Option<String>,
    /// Restrict to a single author's quotes.
    pub author_id: Option<DbId>,
    /// Author scope by case-insensitive name, used when `author_id` is absent.
    pub author: Option<String>,
    /// Restrict to quotes belonging to a topic.
    pub topic_id: Option<DbId>,
    /// Topic scope by case-insensitive name, used when `topic_id` is absent.
    pub topic: Option<String>,
    /// Ordering token, resolved to `QuoteOrdering` at the boundary.
    pub order_by: Option<String>,
    #[serde(default)]
    pub reverse: bool,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query parameters for `GET /quotes/random`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomQuoteParams {
    pub lang: Option<String>,
    pub author_id: Option<DbId>,
    pub topic_id: Option<DbId>,
    /// Optional free-text filter; any narrowing filter disables the
    /// probabilistic pre-accept.
    pub q: Option<String>,
}
