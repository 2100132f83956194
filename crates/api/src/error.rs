use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use screencamp_core::error::CoreError;
use screencamp_core::prediction::PredictionError;
use serde_json::{json, Map, Value};

/// Longest scorer stderr/stdout excerpt returned to clients (4 KiB).
const MAX_DIAGNOSTIC_BYTES: usize = 4 * 1024;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{"error": ..., "code": ...}` plus variant-specific fields.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `screencamp_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The scoring bridge failed.
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut extra = Map::new();

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Request validation ---
            AppError::Validation(errors) => {
                extra.insert(
                    "details".into(),
                    serde_json::to_value(errors).unwrap_or(Value::Null),
                );
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                )
            }

            // --- Scoring bridge ---
            AppError::Prediction(err) => classify_prediction_error(err, &mut extra),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = Map::new();
        body.insert("error".into(), Value::String(message));
        body.insert("code".into(), json!(code));
        body.extend(extra);

        (status, axum::Json(Value::Object(body))).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 400, matching the explicit duplicate checks in the handlers.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_users_email" {
                    return (
                        StatusCode::BAD_REQUEST,
                        "CONFLICT",
                        "User already exists".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::BAD_REQUEST,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

fn classify_prediction_error(
    err: &PredictionError,
    extra: &mut Map<String, Value>,
) -> (StatusCode, &'static str, String) {
    match err {
        PredictionError::Busy { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SCORER_BUSY",
            "Prediction service is busy, try again shortly".to_string(),
        ),
        PredictionError::TimedOut { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "PREDICTION_TIMEOUT",
            "Prediction timed out".to_string(),
        ),
        PredictionError::FailedToStart(e) => {
            extra.insert("details".into(), Value::String(e.to_string()));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_START_FAILED",
                "Failed to start prediction".to_string(),
            )
        }
        PredictionError::NonZeroExit { exit_code, stderr } => {
            extra.insert("exitCode".into(), json!(exit_code));
            extra.insert("stderr".into(), Value::String(truncate_diagnostic(stderr)));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_FAILED",
                "Prediction failed".to_string(),
            )
        }
        PredictionError::InvalidOutput { stdout, .. } => {
            extra.insert("stdout".into(), Value::String(truncate_diagnostic(stdout)));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_INVALID_OUTPUT",
                "Invalid JSON from prediction".to_string(),
            )
        }
        PredictionError::Io(e) => {
            tracing::error!(error = %e, "Scorer I/O error");
            internal()
        }
    }
}

/// Cut `text` to at most [`MAX_DIAGNOSTIC_BYTES`] on a char boundary.
fn truncate_diagnostic(text: &str) -> String {
    if text.len() <= MAX_DIAGNOSTIC_BYTES {
        return text.to_string();
    }
    let mut end = MAX_DIAGNOSTIC_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
