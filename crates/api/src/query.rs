//! Shared query parameter parsing helpers.

use quotd_core::error::CoreError;
use quotd_core::types::Day;

/// Parse an optional `YYYY-MM-DD` query parameter.
///
/// An absent or empty value is "unspecified" (`Ok(None)`); a malformed one
/// is a validation error surfaced before the store is touched.
pub fn parse_date(value: Option<&str>) -> Result<Option<Day>, CoreError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    Day::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            CoreError::Validation(format!("Malformed date '{value}', expected YYYY-MM-DD"))
        })
}
