pub mod booking;
pub mod camp;
pub mod prediction;
pub mod user;
