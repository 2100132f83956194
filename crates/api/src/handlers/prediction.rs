//! POST /predict: relay a JSON payload through the scoring process.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /predict
///
/// The body is passed to the scorer unchanged; an empty body is sent as
/// `[]`. The scorer's JSON output is returned as-is.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let payload = parse_payload(&body)?;

    match state.scorer.predict(payload).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                in_flight = state.scorer.in_flight(),
                "Prediction failed"
            );
            Err(AppError::Prediction(e))
        }
    }
}

fn parse_payload(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Array(Vec::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {e}")))
}
