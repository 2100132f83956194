//! User entity model and DTOs.

use screencamp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::fields::non_blank;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// The public part of a user returned after registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Request body for `POST /register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"), email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank"))]
    pub password: String,
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
