//! Topic models.

use quotd_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub name: String,
    pub is_icelandic: bool,
}

/// Query parameters for `GET /topics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicListParams {
    pub lang: Option<String>,
}

/// Query parameters for `GET /topics/{id}` (pages the member quotes).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicDetailParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
