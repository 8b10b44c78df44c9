//! Response DTOs for the image proxy API
//!
//! Defines the JSON bodies of the health and stats endpoints. Image responses
//! are raw bytes and have no DTO.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of requests served from disk
    pub hits: u64,
    /// Number of requests that went to the origin
    pub misses: u64,
    /// Number of origin responses cached
    pub fetches: u64,
    /// Number of origin responses rejected as non-images
    pub rejected: u64,
    /// Number of requests that failed
    pub failures: u64,
    /// Number of entries removed by the sweep
    pub cleaned: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            fetches: snapshot.fetches,
            rejected: snapshot.rejected,
            failures: snapshot.failures,
            cleaned: snapshot.cleaned,
            hit_rate: snapshot.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime_secs: u64,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(started_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            status: "healthy".to_string(),
            timestamp: now.to_rfc3339(),
            uptime_secs: (now - started_at).num_seconds().max(0) as u64,
        }
    }
}
