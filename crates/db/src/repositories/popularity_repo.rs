//! Repository for popularity counter updates.
//!
//! Counters are bumped with a single set-based relative update
//! (`count = count + delta`), never a read-then-write of an absolute value,
//! so concurrent bumps for overlapping id sets compose without lost updates.

use quotd_core::types::DbId;
use sqlx::PgPool;

/// Counter bump applied when an item appears in a list/search result.
pub const APPEARANCE_INCREMENT: i64 = 1;

/// Counter bump applied when an item is fetched directly by id.
pub const DIRECT_FETCH_INCREMENT: i64 = 10;

/// Provides batched popularity counter writes.
pub struct PopularityRepo;

impl PopularityRepo {
    /// Increment the popularity counter of each listed quote by `delta`.
    /// Returns the number of rows touched.
    pub async fn increment_quotes(
        pool: &PgPool,
        ids: &[DbId],
        delta: i64,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE quotes SET count = count + $1 WHERE id = ANY($2)")
            .bind(delta)
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Increment the popularity counter of each listed author by `delta`.
    /// Returns the number of rows touched.
    pub async fn increment_authors(
        pool: &PgPool,
        ids: &[DbId],
        delta: i64,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE authors SET count = count + $1 WHERE id = ANY($2)")
            .bind(delta)
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
