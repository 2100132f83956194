//! Row models and create DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts

pub mod booking;
pub mod camp;
pub mod fields;
pub mod user;
