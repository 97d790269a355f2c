//! Repository for topics.

use quotd_core::types::{DbId, Language};
use sqlx::PgPool;

use crate::models::topic::Topic;

/// Column list for `topics` queries.
const TOPIC_COLUMNS: &str = "id, name, is_icelandic";

/// Provides read operations over topics.
pub struct TopicRepo;

impl TopicRepo {
    /// List topics under the given language scope, alphabetically.
    pub async fn list(pool: &PgPool, lang: Language) -> Result<Vec<Topic>, sqlx::Error> {
        let sql = format!(
            "SELECT {TOPIC_COLUMNS} FROM topics \
             WHERE ($1::BOOL IS NULL OR is_icelandic = $1) \
             ORDER BY name ASC, id DESC"
        );

        sqlx::query_as::<_, Topic>(&sql)
            .bind(lang.icelandic_flag())
            .fetch_all(pool)
            .await
    }

    /// Find a single topic by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Topic>, sqlx::Error> {
        let sql = format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = $1");

        sqlx::query_as::<_, Topic>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a single topic by case-insensitive exact name.
    ///
    /// Used when a caller scopes by topic name instead of id.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Topic>, sqlx::Error> {
        let sql = format!(
            "SELECT {TOPIC_COLUMNS} FROM topics \
             WHERE LOWER(name) = LOWER($1) \
             ORDER BY id DESC \
             LIMIT 1"
        );

        sqlx::query_as::<_, Topic>(&sql)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
