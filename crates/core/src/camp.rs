//! Camp scheduling rules: date parsing, listing filters, and the
//! availability badge shown next to each camp.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// State assigned to a camp when the request omits it.
pub const DEFAULT_STATE: &str = "Karnataka";

/// Lifecycle status assigned to a new camp.
pub const DEFAULT_STATUS: &str = "upcoming";

/// A camp with this many open slots or fewer is shown as almost full.
pub const ALMOST_FULL_THRESHOLD: i64 = 5;

/// A camp with this many open slots or fewer is shown as filling fast.
pub const FILLING_FAST_THRESHOLD: i64 = 15;

/// Filter value the client sends to mean "any".
const MATCH_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a camp date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// For timestamps only the UTC calendar date is kept.
pub fn parse_camp_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            CoreError::Validation(format!(
                "date must be YYYY-MM-DD or an RFC 3339 timestamp, got \"{raw}\""
            ))
        })
}

// ---------------------------------------------------------------------------
// Listing filter
// ---------------------------------------------------------------------------

/// Normalised filter for the camp listing.
///
/// `None` in any position means the criterion is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampFilter {
    /// Case-insensitive substring matched against name, venue, and district.
    pub search: Option<String>,
    /// Exact state match.
    pub state: Option<String>,
    /// Exact district match.
    pub district: Option<String>,
}

impl CampFilter {
    /// Build a filter from raw query values, dropping blanks and `all`.
    pub fn new(search: Option<&str>, state: Option<&str>, district: Option<&str>) -> Self {
        Self {
            search: search.and_then(|s| non_blank(s).map(str::to_string)),
            state: state.and_then(selector),
            district: district.and_then(selector),
        }
    }

    /// `ILIKE` pattern for the search term, with wildcards in the term escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn selector(value: &str) -> Option<String> {
    non_blank(value)
        .filter(|v| !v.eq_ignore_ascii_case(MATCH_ALL))
        .map(str::to_string)
}

/// Escape `\`, `%`, and `_` so user input matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Badge derived from the number of open slots at a camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    AlmostFull,
    FillingFast,
    Available,
}

impl Availability {
    pub fn from_open_slots(open: i64) -> Self {
        if open <= ALMOST_FULL_THRESHOLD {
            Self::AlmostFull
        } else if open <= FILLING_FAST_THRESHOLD {
            Self::FillingFast
        } else {
            Self::Available
        }
    }
}

/// Remaining capacity given the configured slots and current bookings.
///
/// Capacity is not enforced when booking, so this is floored at zero.
pub fn open_slots(slots: i32, booked: i64) -> i64 {
    (i64::from(slots) - booked).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
