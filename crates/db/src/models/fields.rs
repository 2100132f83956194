//! Field-level validators and normalisers shared by the create DTOs.

use std::borrow::Cow;

use screencamp_core::camp::parse_camp_date;
use validator::ValidationError;

/// Reject empty and whitespace-only strings.
///
/// Required text fields default to `""` when absent from the request body,
/// so this also reports missing fields.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("This field is required")));
    }
    Ok(())
}

/// Reject a camp date that is neither `YYYY-MM-DD` nor RFC 3339.
pub fn camp_date(value: &str) -> Result<(), ValidationError> {
    parse_camp_date(value).map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_date")
            .with_message(Cow::Borrowed("Expected YYYY-MM-DD or an RFC 3339 timestamp"))
    })
}

/// Treat an empty optional string the same as an absent one.
pub fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
