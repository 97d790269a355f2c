//! Day-of ("quote of the day" / "author of the day") models and DTOs.

use quotd_core::types::{Day, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A day-of-quote record joined with its quote and author.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteOfDay {
    pub day: Day,
    pub id: DbId,
    pub author_id: DbId,
    /// Author display name.
    pub name: String,
    pub quote: String,
    pub is_icelandic: bool,
    pub count: i64,
}

/// A day-of-author record joined with its author.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorOfDay {
    pub day: Day,
    pub id: DbId,
    pub name: String,
    pub count: i64,
    pub number_of_english_quotes: i64,
    pub number_of_icelandic_quotes: i64,
}

/// Query parameters for `GET /quotes/qod` and `GET /authors/aod`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayOfParams {
    pub lang: Option<String>,
    /// Requested date, `YYYY-MM-DD`; defaults to today. Historical misses
    /// are not back-filled.
    pub date: Option<String>,
}

/// Query parameters for the day-of history endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayOfHistoryParams {
    pub lang: Option<String>,
    /// Earliest date to include, `YYYY-MM-DD`; defaults to the beginning of
    /// recorded history.
    pub minimum: Option<String>,
}
