//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod camp_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use camp_repo::CampRepo;
pub use user_repo::UserRepo;
