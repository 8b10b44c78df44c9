//! Expiry Sweep Task
//!
//! Background task that periodically deletes stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps the cache directory every `interval`,
/// deleting entries last modified more than `retention` ago.
///
/// The first sweep runs one full interval after startup. Sweep failures are
/// logged by the store and never end the loop.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheStore::new("cache"));
/// let sweep_handle = spawn_cleanup_task(cache.clone(), SWEEP_INTERVAL, RETENTION);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<CacheStore>,
    interval: Duration,
    retention: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            retention_secs = retention.as_secs(),
            "Starting cache sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired(retention).await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
