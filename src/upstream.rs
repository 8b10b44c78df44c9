//! Origin fetching
//!
//! Issues the single outbound GET for a cache miss, with browser-like headers
//! and a bounded timeout.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REFERER_VALUE: &str = "https://www.dekomo.ru/";
pub const ACCEPT_VALUE: &str = "image/webp,image/apng,image/*,*/*;q=0.8";
pub const ACCEPT_LANGUAGE_VALUE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

/// Body and content type returned by the origin.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub data: Bytes,
    /// `None` when the origin sent no usable `Content-Type`
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// True when the origin declared an `image/*` content type.
    pub fn is_image(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_image_content_type)
    }
}

/// Checks the `image/` prefix the proxy requires before caching.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// HTTP client for fetching images from origin servers
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url` once. Non-2xx statuses are errors; the body is kept as raw bytes.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        debug!(url, "Fetching from origin");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url, "Origin returned non-success status");
            return Err(ProxyError::Upstream(format!(
                "origin returned status {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response.bytes().await?;

        debug!(
            size = data.len(),
            content_type = ?content_type,
            "Fetched from origin"
        );

        Ok(FetchedImage { data, content_type })
    }
}
