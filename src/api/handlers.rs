//! API Handlers
//!
//! HTTP request handlers for the image proxy endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{FetchParams, HealthResponse, StatsResponse};
use crate::upstream::ImageFetcher;

pub const MISSING_URL_MESSAGE: &str = "Missing \"url\" parameter";
pub const NOT_AN_IMAGE_MESSAGE: &str = "URL does not point to an image";

/// Response header reporting `HIT` or `MISS`.
pub const X_CACHE: &str = "x-cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// On-disk image cache, also held by the sweep task
    pub cache: Arc<CacheStore>,
    /// Origin client
    pub fetcher: ImageFetcher,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new AppState with the given cache and fetcher.
    pub fn new(cache: Arc<CacheStore>, fetcher: ImageFetcher) -> Self {
        Self {
            cache,
            fetcher,
            started_at: Utc::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Does not touch the filesystem; callers run [`CacheStore::init`] first.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(CacheStore::new(config.cache_dir.clone()));
        let fetcher = ImageFetcher::new(config.fetch_timeout)?;
        Ok(Self::new(cache, fetcher))
    }
}

/// Whether a response came from disk or from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// An image ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct ServedImage {
    pub data: Bytes,
    pub content_type: String,
    pub status: CacheStatus,
}

impl IntoResponse for ServedImage {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type),
                (HeaderName::from_static(X_CACHE), self.status.as_str().to_string()),
            ],
            self.data,
        )
            .into_response()
    }
}

/// Handler for GET /fetch?url=...
///
/// Serves the image at `url`, from the cache when present. A query string
/// that does not parse (e.g. `url` given twice) fails like a malformed URL.
pub async fn fetch_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<FetchParams>, QueryRejection>,
) -> Result<ServedImage> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            state.cache.stats().record_failure();
            error!(error = %rejection, "Unparseable query string");
            return Err(ProxyError::InvalidUrl(rejection.body_text()));
        }
    };
    let Some(url) = params.target() else {
        return Err(ProxyError::BadRequest(MISSING_URL_MESSAGE.to_string()));
    };

    serve_image(&state, url).await.map_err(|e| {
        match &e {
            ProxyError::BadRequest(_) => warn!(url, error = %e, "Rejected request"),
            _ => {
                state.cache.stats().record_failure();
                error!(url, error = %e, "Fetch error");
            }
        }
        e
    })
}

/// Cache lookup, then origin fetch, validation and persist on a miss.
pub async fn serve_image(state: &AppState, url: &str) -> Result<ServedImage> {
    let key = CacheKey::from_url(url)?;
    let cache = &state.cache;

    if let Some(data) = cache.get(&key).await? {
        cache.stats().record_hit();
        return Ok(ServedImage {
            data: Bytes::from(data),
            content_type: key.content_type().to_string(),
            status: CacheStatus::Hit,
        });
    }
    cache.stats().record_miss();

    let fetched = state.fetcher.fetch(url).await?;
    let content_type = match fetched.content_type {
        Some(ref content_type) if fetched.is_image() => content_type.clone(),
        _ => {
            cache.stats().record_rejected();
            return Err(ProxyError::BadRequest(NOT_AN_IMAGE_MESSAGE.to_string()));
        }
    };

    cache.put(&key, &fetched.data).await?;
    cache.stats().record_fetch();

    Ok(ServedImage {
        data: fetched.data,
        content_type,
        status: CacheStatus::Miss,
    })
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().snapshot().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.started_at))
}
