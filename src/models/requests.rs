//! Request DTOs for the image proxy API
//!
//! Defines the query parameters accepted by the fetch endpoint.

use serde::Deserialize;

/// Query string for `GET /fetch`
///
/// # Fields
/// - `url`: The image URL to proxy, percent-encoded in the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchParams {
    /// Target image URL
    #[serde(default)]
    pub url: Option<String>,
}

impl FetchParams {
    /// Returns the target URL, treating an empty value as absent.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
