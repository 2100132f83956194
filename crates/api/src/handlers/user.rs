//! Account registration, login, and the public user count.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use screencamp_core::error::CoreError;
use screencamp_core::user::normalize_email;
use screencamp_db::models::fields::non_blank;
use screencamp_db::models::user::{CreateUser, RegisterUser, UserProfile};
use screencamp_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::json::{AppJson, ValidatedJson};
use crate::response::CountResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub password: String,
}

/// Body returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    // A concurrent registration for the same email loses on `uq_users_email`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful",
            user: UserProfile::from(&user),
        }),
    ))
}

/// POST /login
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful",
        user: UserProfile::from(&user),
    }))
}

/// GET /users/count
pub async fn count(State(state): State<AppState>) -> AppResult<Json<CountResponse>> {
    let count = UserRepo::count(&state.pool).await?;
    Ok(Json(CountResponse { count }))
}
