//! Error types for the image proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body sent to the client for every failure that is not its own fault.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch image";

// == Proxy Error Enum ==
/// Unified error type for the image proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Caller input is invalid or the target is not an image
    #[error("{0}")]
    BadRequest(String),

    /// The target URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Origin fetch failed, timed out or returned a non-success status
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Reading or writing the cache directory failed
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Upstream(err.to_string())
    }
}

impl From<url::ParseError> for ProxyError {
    fn from(err: url::ParseError) -> Self {
        ProxyError::InvalidUrl(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ProxyError::InvalidUrl(_) | ProxyError::Upstream(_) | ProxyError::Filesystem(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE).into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
