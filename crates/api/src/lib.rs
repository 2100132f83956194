//! HTTP surface of the screening-camp service: camps, bookings, accounts,
//! and the risk-prediction bridge.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
