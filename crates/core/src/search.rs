//! Ranking query construction and pagination arithmetic.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the repository layer and any future CLI or offline tooling.

// ---------------------------------------------------------------------------
// Relevance thresholds
// ---------------------------------------------------------------------------

/// Minimum pg_trgm `similarity()` score for an author name to be considered
/// a fuzzy match. Scores at or below this are treated as "no match".
pub const MIN_NAME_SIMILARITY: f32 = 0.105;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Maximum number of results per page.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Default number of items for bounded sub-listings (e.g. an author's quotes).
pub const DEFAULT_MAX_ITEMS: i64 = 1;

/// Maximum number of items for bounded sub-listings.
pub const MAX_MAX_ITEMS: i64 = 50;

// ---------------------------------------------------------------------------
// Random selection tuning
// ---------------------------------------------------------------------------

/// Rows the probabilistic pre-filter aims to let through before the final
/// `ORDER BY random() LIMIT 1`. Keeps the shuffle cheap on large corpora
/// without risking a zero-survivor draw on small ones.
pub const RANDOM_TARGET_SAMPLE: f64 = 200.0;

/// Floor for the acceptance probability so the pre-filter never becomes
/// degenerate on a wildly overestimated table.
pub const MIN_ACCEPT_PROBABILITY: f64 = 0.001;

/// Acceptance probability for the random pre-filter, derived from the
/// planner's estimated row count for the candidate table.
///
/// Small (or unanalyzed, estimate 0) tables get probability 1.0, which
/// disables the pre-filter entirely.
pub fn accept_probability(estimated_rows: i64) -> f64 {
    let estimated = estimated_rows as f64;
    if estimated <= RANDOM_TARGET_SAMPLE {
        return 1.0;
    }
    (RANDOM_TARGET_SAMPLE / estimated).max(MIN_ACCEPT_PROBABILITY)
}

// ---------------------------------------------------------------------------
// Query builder helpers
// ---------------------------------------------------------------------------

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on whitespace.
/// - Strips non-alphanumeric characters (except `_`) from each term.
/// - Drops empty terms.
///
/// Returns `None` if the input yields no usable terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() { None } else { Some(terms) }
}

/// The three tsquery forms derived from one free-text query.
///
/// Each feeds `to_tsquery('english', ...)` and yields an independent
/// `ts_rank` signal; a row is eligible when any form matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingQueries {
    /// Unordered token bag, AND semantics: `a & b`.
    pub plain: String,
    /// Contiguous ordered phrase: `a <-> b`.
    pub phrase: String,
    /// Any-token union, OR semantics: `a | b`.
    pub general: String,
}

/// Build the plain, phrase, and general tsquery forms for a query string.
///
/// Returns `None` when the input yields no usable terms (empty search is
/// "no results", never "all results").
///
/// # Examples
///
/// ```
/// use quotd_core::search::build_ranking_queries;
/// let q = build_ranking_queries("sting like a bee").unwrap();
/// assert_eq!(q.plain, "sting & like & a & bee");
/// assert_eq!(q.phrase, "sting <-> like <-> a <-> bee");
/// assert_eq!(q.general, "sting | like | a | bee");
/// assert_eq!(build_ranking_queries("  "), None);
/// ```
pub fn build_ranking_queries(query: &str) -> Option<RankingQueries> {
    let terms = sanitize_terms(query)?;
    Some(RankingQueries {
        plain: terms.join(" & "),
        phrase: terms.join(" <-> "),
        general: terms.join(" | "),
    })
}

// ---------------------------------------------------------------------------
// Pagination contract
// ---------------------------------------------------------------------------

/// Clamp a user-provided page size to `[1, MAX_PAGE_SIZE]`, defaulting to
/// [`DEFAULT_PAGE_SIZE`] when absent or out of range.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    match page_size {
        Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => n,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Clamp a user-provided max-items bound to `[1, MAX_MAX_ITEMS]`, defaulting
/// to [`DEFAULT_MAX_ITEMS`] when absent or out of range.
pub fn clamp_max_items(max_items: Option<i64>) -> i64 {
    match max_items {
        Some(n) if (1..=MAX_MAX_ITEMS).contains(&n) => n,
        _ => DEFAULT_MAX_ITEMS,
    }
}

/// Clamp a user-provided page number to non-negative.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

/// Result window for a validated page/page-size pair.
///
/// Given the strict total order guaranteed by the id tie-break, the item at
/// global rank `page * page_size + k` is identical whether reached by direct
/// paging or by indexing into a larger page-0 window.
pub fn page_window(page: i64, page_size: i64) -> (i64, i64) {
    (page_size, page * page_size)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- build_ranking_queries ----------------------------------------------

    #[test]
    fn single_term_all_forms_identical() {
        let q = build_ranking_queries("hello").unwrap();
        assert_eq!(q.plain, "hello");
        assert_eq!(q.phrase, "hello");
        assert_eq!(q.general, "hello");
    }

    #[test]
    fn multiple_terms_use_distinct_operators() {
        let q = build_ranking_queries("john dance").unwrap();
        assert_eq!(q.plain, "john & dance");
        assert_eq!(q.phrase, "john <-> dance");
        assert_eq!(q.general, "john | dance");
    }

    #[test]
    fn special_characters_are_stripped() {
        let q = build_ranking_queries("hello! world?").unwrap();
        assert_eq!(q.plain, "hello & world");
    }

    #[test]
    fn underscores_are_preserved() {
        let q = build_ranking_queries("some_term other").unwrap();
        assert_eq!(q.plain, "some_term & other");
    }

    #[test]
    fn empty_input_returns_none() {
        assert_eq!(build_ranking_queries(""), None);
        assert_eq!(build_ranking_queries("   "), None);
        assert_eq!(build_ranking_queries("!?!"), None);
    }

    // -- pagination ---------------------------------------------------------

    #[test]
    fn page_size_defaults_when_absent() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_defaults_when_out_of_range() {
        assert_eq!(clamp_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(-3)), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(201)), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_passes_through_valid_values() {
        assert_eq!(clamp_page_size(Some(1)), 1);
        assert_eq!(clamp_page_size(Some(50)), 50);
        assert_eq!(clamp_page_size(Some(200)), 200);
    }

    #[test]
    fn max_items_bounds() {
        assert_eq!(clamp_max_items(None), DEFAULT_MAX_ITEMS);
        assert_eq!(clamp_max_items(Some(0)), DEFAULT_MAX_ITEMS);
        assert_eq!(clamp_max_items(Some(51)), DEFAULT_MAX_ITEMS);
        assert_eq!(clamp_max_items(Some(50)), 50);
    }

    #[test]
    fn page_floors_at_zero() {
        assert_eq!(clamp_page(None), 0);
        assert_eq!(clamp_page(Some(-1)), 0);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn page_window_offset_arithmetic() {
        assert_eq!(page_window(0, 25), (25, 0));
        assert_eq!(page_window(3, 25), (25, 75));
        // list(page=1, size=50)[0] lines up with list(page=0, size=100)[50].
        assert_eq!(page_window(1, 50).1, 50);
    }

    // -- accept_probability -------------------------------------------------

    #[test]
    fn small_tables_disable_the_prefilter() {
        assert_eq!(accept_probability(0), 1.0);
        assert_eq!(accept_probability(150), 1.0);
    }

    #[test]
    fn large_tables_scale_inverse_to_estimate() {
        let p = accept_probability(40_000);
        assert!((p - 0.005).abs() < 1e-9);
    }

    #[test]
    fn probability_never_drops_below_floor() {
        assert_eq!(accept_probability(i64::MAX), MIN_ACCEPT_PROBABILITY);
    }
}
