//! # API Models Module
//!
//! Request and response structures for the HTTP API.
//! All JSON uses camelCase field names.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
