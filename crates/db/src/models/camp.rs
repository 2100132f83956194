//! Camp entity model and DTOs.

use chrono::NaiveDate;
use screencamp_core::camp::{parse_camp_date, DEFAULT_STATE, DEFAULT_STATUS};
use screencamp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::fields::{camp_date, non_blank};

/// A row from the `camps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: DbId,
    pub name: String,
    pub date: NaiveDate,
    pub venue: String,
    pub state: String,
    pub district: String,
    pub start_time: String,
    pub end_time: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub camp_type: String,
    pub contact: Option<String>,
    pub status: String,
    pub cancer_types: Vec<String>,
    /// Total capacity, when the organisers set one.
    pub slots: Option<i32>,
    pub created_at: Timestamp,
}

/// A camp together with the number of bookings that reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub camp: Camp,
    pub booked: i64,
}

/// Request body for creating a camp.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCamp {
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp; checked by `validate()`.
    #[serde(default)]
    #[validate(required(message = "This field is required"), custom(function = "camp_date"))]
    pub date: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub venue: String,
    #[serde(default = "default_state")]
    #[validate(custom(function = "non_blank"))]
    pub state: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub district: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub start_time: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub end_time: String,
    #[serde(default, rename = "type")]
    #[validate(custom(function = "non_blank"))]
    pub camp_type: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default = "default_status")]
    #[validate(custom(function = "non_blank"))]
    pub status: String,
    #[serde(default)]
    pub cancer_types: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "slots must not be negative"))]
    pub slots: Option<i32>,
}

impl CreateCamp {
    /// The calendar date to store. `None` until `date` passes validation.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(|raw| parse_camp_date(raw).ok())
    }
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> CreateCamp {
        serde_json::from_value(value).expect("deserialize")
    }

    fn full_body() -> serde_json::Value {
        json!({
            "name": "Free Oral Cancer Screening",
            "date": "2025-04-10",
            "venue": "District Hospital",
            "district": "Mysore",
            "startTime": "09:00",
            "endTime": "16:00",
            "type": "Oral",
        })
    }

    #[test]
    fn defaults_are_applied() {
        let camp = parse(full_body());
        assert_eq!(camp.state, "Karnataka");
        assert_eq!(camp.status, "upcoming");
        assert!(camp.cancer_types.is_empty());
        assert!(camp.contact.is_none());
        assert!(camp.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let camp = parse(json!({ "name": "Camp" }));
        let errors = camp.validate().unwrap_err();
        let fields = errors.field_errors();
        // date, venue, district, startTime, endTime, type
        assert_eq!(fields.len(), 6);
        for field in ["date", "venue", "district"] {
            assert!(fields.contains_key(field), "expected error for {field}");
        }
        assert!(!fields.contains_key("name"));
        assert!(!fields.contains_key("state"));
    }

    #[test]
    fn blank_state_is_rejected() {
        let mut body = full_body();
        body["state"] = json!("  ");
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("state"));
    }

    #[test]
    fn negative_slots_rejected() {
        let mut body = full_body();
        body["slots"] = json!(-1);
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slots"));
    }

    #[test]
    fn malformed_date_is_a_field_error() {
        let mut body = full_body();
        body["date"] = json!("tomorrow");
        let camp = parse(body);
        assert_eq!(camp.parsed_date(), None);

        let errors = camp.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["date"][0].code, "invalid_date");
    }

    #[test]
    fn rfc3339_date_keeps_utc_day() {
        let mut body = full_body();
        body["date"] = json!("2025-04-10T22:00:00-05:00");
        let camp = parse(body);
        assert!(camp.validate().is_ok());
        assert_eq!(camp.parsed_date(), NaiveDate::from_ymd_opt(2025, 4, 11));
    }
}
