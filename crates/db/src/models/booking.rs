//! Booking entity model and DTOs.

use screencamp_core::booking::{deserialize_text_or_number, DEFAULT_STATUS};
use screencamp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::camp::Camp;
use super::fields::non_blank;

/// A row from the `bookings` table.
///
/// `camp_name`, `state`, and `district` are copies taken when the booking
/// was made. They are never refreshed from the camp.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub state: String,
    pub district: String,
    pub camp_id: DbId,
    pub camp_name: String,
    pub booking_date: Timestamp,
    pub status: String,
}

/// A booking with the referenced camp attached, if it still exists.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithCamp {
    #[serde(flatten)]
    pub booking: Booking,
    pub camp: Option<Camp>,
}

/// Request body for creating a booking.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    #[validate(custom(function = "non_blank"))]
    pub age: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub gender: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub state: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub district: String,
    #[serde(default)]
    #[validate(required(message = "This field is required"))]
    pub camp_id: Option<DbId>,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub camp_name: String,
    /// Defaults to the insert time when absent.
    #[serde(default)]
    pub booking_date: Option<Timestamp>,
    #[serde(default = "default_status")]
    #[validate(custom(function = "non_blank"))]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}
