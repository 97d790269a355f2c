use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (day-of records) carry no time or zone component.
pub type Day = chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Language scope requested by a caller.
///
/// Parsed case-insensitively from the `lang` query parameter. An absent or
/// empty value means "no constraint", never "match nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// No language constraint.
    #[default]
    Any,
    English,
    Icelandic,
}

impl Language {
    /// Parse a caller-supplied language token.
    ///
    /// Empty / whitespace-only input yields [`Language::Any`]; an unknown
    /// token is a validation error rather than a silent default.
    pub fn parse(token: Option<&str>) -> Result<Self, CoreError> {
        let token = token.unwrap_or("").trim();
        if token.is_empty() {
            return Ok(Language::Any);
        }
        match token.to_ascii_lowercase().as_str() {
            "english" => Ok(Language::English),
            "icelandic" => Ok(Language::Icelandic),
            other => Err(CoreError::Validation(format!(
                "Unknown language '{other}', expected 'english' or 'icelandic'"
            ))),
        }
    }

    /// The `is_icelandic` flag to bind into language predicates, or `None`
    /// for no constraint (`($n::BOOL IS NULL OR is_icelandic = $n)`).
    pub fn icelandic_flag(self) -> Option<bool> {
        match self {
            Language::Any => None,
            Language::English => Some(false),
            Language::Icelandic => Some(true),
        }
    }

    /// Resolve the concrete language for singleton day-of records, which are
    /// keyed per language. An unconstrained request resolves to English.
    pub fn icelandic_or_default(self) -> bool {
        matches!(self, Language::Icelandic)
    }
}

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// The two entity kinds that carry popularity counters and day-of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Quote,
    Author,
}
