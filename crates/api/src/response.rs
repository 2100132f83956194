//! Small response envelopes shared by several handlers.

use screencamp_core::types::DbId;
use serde::Serialize;

/// Body returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
    pub id: DbId,
}

/// Body carrying a single count.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
