use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::camp;
use crate::state::AppState;

/// Routes mounted at `/camps`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(camp::list).post(camp::create))
        .route("/{id}", delete(camp::delete))
}
