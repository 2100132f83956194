//! Handlers for the `/camps` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use screencamp_core::camp::{open_slots, Availability, CampFilter};
use screencamp_core::error::CoreError;
use screencamp_core::types::DbId;
use screencamp_db::models::camp::{Camp, CampSummary, CreateCamp};
use screencamp_db::repositories::CampRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::json::ValidatedJson;
use crate::response::DeletedResponse;
use crate::state::AppState;

/// Query parameters for `GET /camps`.
///
/// `"all"` or an empty value disables a filter.
#[derive(Debug, Default, Deserialize)]
pub struct CampListParams {
    pub search: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

/// A camp as listed to clients, with booking counts and remaining capacity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampListing {
    #[serde(flatten)]
    pub summary: CampSummary,
    /// `None` when the camp has no capacity set.
    pub available_slots: Option<i64>,
    pub availability: Option<Availability>,
}

impl From<CampSummary> for CampListing {
    fn from(summary: CampSummary) -> Self {
        let available_slots = summary
            .camp
            .slots
            .map(|slots| open_slots(slots, summary.booked));
        Self {
            availability: available_slots.map(Availability::from_open_slots),
            available_slots,
            summary,
        }
    }
}

/// POST /camps
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCamp>,
) -> AppResult<(StatusCode, Json<Camp>)> {
    let camp = CampRepo::create(&state.pool, &input).await?;
    tracing::info!(camp_id = camp.id, district = %camp.district, "Camp created");
    Ok((StatusCode::CREATED, Json(camp)))
}

/// GET /camps
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CampListParams>,
) -> AppResult<Json<Vec<CampListing>>> {
    let filter = CampFilter::new(
        params.search.as_deref(),
        params.state.as_deref(),
        params.district.as_deref(),
    );
    let camps = CampRepo::list(&state.pool, &filter).await?;
    Ok(Json(camps.into_iter().map(CampListing::from).collect()))
}

/// DELETE /camps/{id}
///
/// Bookings made for the camp are kept.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeletedResponse>> {
    if CampRepo::delete(&state.pool, id).await? {
        tracing::info!(camp_id = id, "Camp deleted");
        Ok(Json(DeletedResponse {
            message: "Camp deleted",
            id,
        }))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Camp", id }))
    }
}
