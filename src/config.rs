//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Entries older than this are removed by the sweep.
pub const RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// How often the sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on a single origin fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "image_proxy=info,tower_http=info";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CACHE_DIR: &str = "cache";

/// Proxy configuration parameters.
///
/// Built once at startup and handed to the router state and the sweep task.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding cached images
    pub cache_dir: PathBuf,
    /// Maximum age of a cache entry before the sweep deletes it
    pub retention: Duration,
    /// Interval between sweep runs
    pub sweep_interval: Duration,
    /// Timeout for origin fetches
    pub fetch_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `CACHE_DIR` - Cache root directory (default: `cache`)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            retention: RETENTION,
            sweep_interval: SWEEP_INTERVAL,
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}
