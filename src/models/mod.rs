//! Request and Response models for the image proxy API
//!
//! This module defines the query parameters and JSON bodies used by the
//! HTTP endpoints.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::FetchParams;
pub use responses::{HealthResponse, StatsResponse};
