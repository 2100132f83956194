//! Handlers for the `/bookings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use screencamp_core::error::CoreError;
use screencamp_core::types::DbId;
use screencamp_db::models::booking::{Booking, BookingWithCamp, CreateBooking};
use screencamp_db::repositories::BookingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::json::ValidatedJson;
use crate::response::DeletedResponse;
use crate::state::AppState;

/// POST /bookings
///
/// `campId` is stored as given; it is not checked against existing camps.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = BookingRepo::create(&state.pool, &input).await?;
    tracing::info!(
        booking_id = booking.id,
        camp_id = booking.camp_id,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<BookingWithCamp>>> {
    let bookings = BookingRepo::list_with_camps(&state.pool).await?;
    Ok(Json(bookings))
}

/// DELETE /bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeletedResponse>> {
    if BookingRepo::delete(&state.pool, id).await? {
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(Json(DeletedResponse {
            message: "Booking deleted",
            id,
        }))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
    }
}
