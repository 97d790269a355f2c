//! Closed ordering strategies for list endpoints.
//!
//! Caller-supplied `order_by` tokens are resolved once at the boundary into
//! these enums; the repository layer maps each variant to a fixed ORDER BY
//! fragment. Every ordering ends with an id tie-break so pagination is
//! reproducible (see `search::page_window`).

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// Ordering strategies for author listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorOrdering {
    /// By display name, A first.
    #[default]
    Alphabetical,
    /// By popularity counter, most popular first.
    Popularity,
    /// By total number of owned quotes, most prolific first.
    QuoteCount,
}

impl AuthorOrdering {
    /// Resolve a caller-supplied token, case-insensitively.
    ///
    /// Unrecognized or absent tokens fall back to the default (alphabetical),
    /// matching the lenient handling of the other list parameters.
    pub fn parse(token: Option<&str>) -> Self {
        match token.unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "popularity" => AuthorOrdering::Popularity,
            "nrofquotes" | "quotecount" => AuthorOrdering::QuoteCount,
            _ => AuthorOrdering::Alphabetical,
        }
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Ordering strategies for quote listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteOrdering {
    /// By quote id, newest first.
    #[default]
    QuoteId,
    /// By popularity counter, most popular first.
    Popularity,
    /// By text length, shortest first.
    Length,
}

impl QuoteOrdering {
    /// Resolve a caller-supplied token, case-insensitively.
    pub fn parse(token: Option<&str>) -> Self {
        match token.unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "popularity" => QuoteOrdering::Popularity,
            "length" => QuoteOrdering::Length,
            _ => QuoteOrdering::QuoteId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_ordering_is_case_insensitive() {
        assert_eq!(
            AuthorOrdering::parse(Some("Popularity")),
            AuthorOrdering::Popularity
        );
        assert_eq!(
            AuthorOrdering::parse(Some("NROFQUOTES")),
            AuthorOrdering::QuoteCount
        );
    }

    #[test]
    fn author_ordering_defaults_to_alphabetical() {
        assert_eq!(AuthorOrdering::parse(None), AuthorOrdering::Alphabetical);
        assert_eq!(AuthorOrdering::parse(Some("")), AuthorOrdering::Alphabetical);
        assert_eq!(
            AuthorOrdering::parse(Some("banana")),
            AuthorOrdering::Alphabetical
        );
    }

    #[test]
    fn quote_ordering_tokens() {
        assert_eq!(QuoteOrdering::parse(Some("popularity")), QuoteOrdering::Popularity);
        assert_eq!(QuoteOrdering::parse(Some("Length")), QuoteOrdering::Length);
        assert_eq!(QuoteOrdering::parse(None), QuoteOrdering::QuoteId);
    }
}
