//! Repository for the `bookings` table.

use std::collections::HashMap;

use screencamp_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingWithCamp, CreateBooking};
use crate::models::fields::blank_to_none;
use crate::repositories::CampRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, gender, phone, email, address, state, district, \
                       camp_id, camp_name, booking_date, status";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking, returning the created row.
    ///
    /// `camp_id` is stored as given; it is not checked against `camps`.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (name, age, gender, phone, email, address, state, district,
                 camp_id, camp_name, booking_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, NOW()), $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.name.trim())
            .bind(input.age.trim())
            .bind(input.gender.trim())
            .bind(input.phone.trim())
            .bind(blank_to_none(input.email.as_deref()))
            .bind(blank_to_none(input.address.as_deref()))
            .bind(input.state.trim())
            .bind(input.district.trim())
            .bind(input.camp_id)
            .bind(input.camp_name.trim())
            .bind(input.booking_date)
            .bind(input.status.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookings in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }

    /// List all bookings, attaching the referenced camp where it still exists.
    pub async fn list_with_camps(pool: &PgPool) -> Result<Vec<BookingWithCamp>, sqlx::Error> {
        let bookings = Self::list(pool).await?;

        let mut camp_ids: Vec<DbId> = bookings.iter().map(|b| b.camp_id).collect();
        camp_ids.sort_unstable();
        camp_ids.dedup();

        let camps: HashMap<DbId, _> = CampRepo::find_by_ids(pool, &camp_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingWithCamp {
                camp: camps.get(&booking.camp_id).cloned(),
                booking,
            })
            .collect())
    }

    /// Hard-delete a booking. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
