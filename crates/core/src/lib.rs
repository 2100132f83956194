//! Domain rules for the screening-camp service.
//!
//! Everything here is free of database and HTTP concerns so it can be
//! shared by the persistence layer and the API, and unit-tested in
//! isolation. The only I/O lives in [`prediction`], which drives the
//! external scoring process.

pub mod booking;
pub mod camp;
pub mod error;
pub mod prediction;
pub mod types;
pub mod user;
