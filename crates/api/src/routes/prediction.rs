use axum::routing::post;
use axum::Router;

use crate::handlers::prediction;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/predict", post(prediction::predict))
}
