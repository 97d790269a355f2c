//! Repository for day-of records (quote of the day, author of the day).
//!
//! One row per (date, language) per kind. Today's row is generated lazily on
//! first read via a single bounded re-read, never through unbounded retry.
//! Concurrent generation for the same day races benignly: the upsert's
//! overwrite-on-conflict makes the last writer win, which costs less than
//! cross-request locking for a once-a-day event.

use chrono::Utc;
use quotd_core::types::{Day, DbId, Language};
use sqlx::PgPool;

use crate::models::day_of::{AuthorOfDay, QuoteOfDay};
use crate::repositories::{AuthorRepo, QuoteRepo};

/// Projection for day-of-quote reads.
const QUOTE_OF_DAY_COLUMNS: &str =
    "d.day, q.id, q.author_id, a.name, q.quote, q.is_icelandic, q.count";

/// Projection for day-of-author reads.
const AUTHOR_OF_DAY_COLUMNS: &str =
    "d.day, a.id, a.name, a.count, a.number_of_english_quotes, a.number_of_icelandic_quotes";

/// Today's date (UTC). Day-of records are keyed on this.
pub fn today() -> Day {
    Utc::now().date_naive()
}

/// Earliest date the history endpoints scan back to when no minimum is
/// given. Predates any possible record while staying in Postgres DATE range.
pub fn history_epoch() -> Day {
    Day::from_ymd_opt(1900, 1, 1).unwrap_or(Day::MIN)
}

/// Provides day-of reads, history, and lazy generation.
pub struct DayOfRepo;

impl DayOfRepo {
    // -----------------------------------------------------------------------
    // Quote of the day
    // -----------------------------------------------------------------------

    /// Fetch the quote of the day for a date, generating today's entry on a
    /// miss.
    ///
    /// Historical misses stay absent (history is never back-filled). When
    /// today's row is missing, a random quote scoped to the language is
    /// selected and upserted, then the row is re-read exactly once. `None`
    /// means the corpus had no eligible candidate.
    pub async fn quote_of_day(
        pool: &PgPool,
        date: Day,
        lang: Language,
    ) -> Result<Option<QuoteOfDay>, sqlx::Error> {
        let icelandic = lang.icelandic_or_default();

        if let Some(row) = Self::get_quote_for_date(pool, date, icelandic).await? {
            return Ok(Some(row));
        }
        if date != today() {
            return Ok(None);
        }

        let Some(quote) = QuoteRepo::random(pool, concrete(icelandic), None, None, None).await?
        else {
            return Ok(None);
        };
        Self::set_quote_of_day(pool, date, icelandic, quote.id).await?;
        tracing::debug!(day = %date, icelandic, quote_id = quote.id, "Generated quote of the day");

        Self::get_quote_for_date(pool, date, icelandic).await
    }

    /// All day-of-quote rows with date in `[min_date, today]`, newest first.
    ///
    /// If the history is empty or its most recent entry is not dated today,
    /// today's entry is generated and the whole fetch retried once.
    pub async fn quote_of_day_history(
        pool: &PgPool,
        min_date: Day,
        lang: Language,
    ) -> Result<Vec<QuoteOfDay>, sqlx::Error> {
        let icelandic = lang.icelandic_or_default();
        let today = today();

        let rows = Self::fetch_quote_history(pool, min_date, today, icelandic).await?;
        if rows.first().is_some_and(|r| r.day == today) {
            return Ok(rows);
        }

        match QuoteRepo::random(pool, concrete(icelandic), None, None, None).await? {
            Some(quote) => {
                Self::set_quote_of_day(pool, today, icelandic, quote.id).await?;
                Self::fetch_quote_history(pool, min_date, today, icelandic).await
            }
            None => Ok(rows),
        }
    }

    /// Upsert today's quote selection; overwrites an existing row for the
    /// same (date, language) rather than duplicating it.
    pub async fn set_quote_of_day(
        pool: &PgPool,
        day: Day,
        icelandic: bool,
        quote_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO day_of_quotes (day, is_icelandic, quote_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (day, is_icelandic) \
             DO UPDATE SET quote_id = EXCLUDED.quote_id",
        )
        .bind(day)
        .bind(icelandic)
        .bind(quote_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn get_quote_for_date(
        pool: &PgPool,
        day: Day,
        icelandic: bool,
    ) -> Result<Option<QuoteOfDay>, sqlx::Error> {
        let sql = format!(
            "SELECT {QUOTE_OF_DAY_COLUMNS} \
             FROM day_of_quotes d \
             JOIN quotes q ON q.id = d.quote_id \
             JOIN authors a ON a.id = q.author_id \
             WHERE d.day = $1 AND d.is_icelandic = $2"
        );

        sqlx::query_as::<_, QuoteOfDay>(&sql)
            .bind(day)
            .bind(icelandic)
            .fetch_optional(pool)
            .await
    }

    async fn fetch_quote_history(
        pool: &PgPool,
        min_date: Day,
        max_date: Day,
        icelandic: bool,
    ) -> Result<Vec<QuoteOfDay>, sqlx::Error> {
        let sql = format!(
            "SELECT {QUOTE_OF_DAY_COLUMNS} \
             FROM day_of_quotes d \
             JOIN quotes q ON q.id = d.quote_id \
             JOIN authors a ON a.id = q.author_id \
             WHERE d.is_icelandic = $1 AND d.day >= $2 AND d.day <= $3 \
             ORDER BY d.day DESC"
        );

        sqlx::query_as::<_, QuoteOfDay>(&sql)
            .bind(icelandic)
            .bind(min_date)
            .bind(max_date)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Author of the day
    // -----------------------------------------------------------------------

    /// Fetch the author of the day for a date; same contract as
    /// [`DayOfRepo::quote_of_day`].
    pub async fn author_of_day(
        pool: &PgPool,
        date: Day,
        lang: Language,
    ) -> Result<Option<AuthorOfDay>, sqlx::Error> {
        let icelandic = lang.icelandic_or_default();

        if let Some(row) = Self::get_author_for_date(pool, date, icelandic).await? {
            return Ok(Some(row));
        }
        if date != today() {
            return Ok(None);
        }

        let Some(author) = AuthorRepo::random(pool, concrete(icelandic), None).await? else {
            return Ok(None);
        };
        Self::set_author_of_day(pool, date, icelandic, author.id).await?;
        tracing::debug!(day = %date, icelandic, author_id = author.id, "Generated author of the day");

        Self::get_author_for_date(pool, date, icelandic).await
    }

    /// All day-of-author rows with date in `[min_date, today]`, newest
    /// first; same generation contract as
    /// [`DayOfRepo::quote_of_day_history`].
    pub async fn author_of_day_history(
        pool: &PgPool,
        min_date: Day,
        lang: Language,
    ) -> Result<Vec<AuthorOfDay>, sqlx::Error> {
        let icelandic = lang.icelandic_or_default();
        let today = today();

        let rows = Self::fetch_author_history(pool, min_date, today, icelandic).await?;
        if rows.first().is_some_and(|r| r.day == today) {
            return Ok(rows);
        }

        match AuthorRepo::random(pool, concrete(icelandic), None).await? {
            Some(author) => {
                Self::set_author_of_day(pool, today, icelandic, author.id).await?;
                Self::fetch_author_history(pool, min_date, today, icelandic).await
            }
            None => Ok(rows),
        }
    }

    /// Upsert today's author selection.
    pub async fn set_author_of_day(
        pool: &PgPool,
        day: Day,
        icelandic: bool,
        author_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO day_of_authors (day, is_icelandic, author_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (day, is_icelandic) \
             DO UPDATE SET author_id = EXCLUDED.author_id",
        )
        .bind(day)
        .bind(icelandic)
        .bind(author_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn get_author_for_date(
        pool: &PgPool,
        day: Day,
        icelandic: bool,
    ) -> Result<Option<AuthorOfDay>, sqlx::Error> {
        let sql = format!(
            "SELECT {AUTHOR_OF_DAY_COLUMNS} \
             FROM day_of_authors d \
             JOIN authors a ON a.id = d.author_id \
             WHERE d.day = $1 AND d.is_icelandic = $2"
        );

        sqlx::query_as::<_, AuthorOfDay>(&sql)
            .bind(day)
            .bind(icelandic)
            .fetch_optional(pool)
            .await
    }

    async fn fetch_author_history(
        pool: &PgPool,
        min_date: Day,
        max_date: Day,
        icelandic: bool,
    ) -> Result<Vec<AuthorOfDay>, sqlx::Error> {
        let sql = format!(
            "SELECT {AUTHOR_OF_DAY_COLUMNS} \
             FROM day_of_authors d \
             JOIN authors a ON a.id = d.author_id \
             WHERE d.is_icelandic = $1 AND d.day >= $2 AND d.day <= $3 \
             ORDER BY d.day DESC"
        );

        sqlx::query_as::<_, AuthorOfDay>(&sql)
            .bind(icelandic)
            .bind(min_date)
            .bind(max_date)
            .fetch_all(pool)
            .await
    }
}

/// Day-of generation always selects within one concrete language.
fn concrete(icelandic: bool) -> Language {
    if icelandic {
        Language::Icelandic
    } else {
        Language::English
    }
}
