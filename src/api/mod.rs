//! # API Module
//!
//! HTTP interface for the phone store backend.
//!
//! - `routes` - Endpoint to handler wiring
//! - `handlers` - Request handlers for each endpoint

pub mod handlers;
pub mod routes;

pub use routes::configure_routes;
