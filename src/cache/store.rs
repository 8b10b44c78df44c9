//! Cache Store Module
//!
//! Flat on-disk image store: one file per URL, presence checked on disk,
//! age taken from filesystem modification time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStats};
use crate::error::Result;

/// Distinguishes temp files of concurrent writers within this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

// == Cache Store ==
/// Image cache rooted at a single directory.
///
/// No in-memory index is kept; every lookup goes to the filesystem, so the
/// sweep and request handlers only share the directory itself.
#[derive(Debug)]
pub struct CacheStore {
    /// Cache root directory
    dir: PathBuf,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store rooted at `dir`. Call [`CacheStore::init`] before use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stats: CacheStats::new(),
        }
    }

    /// Ensures the cache directory exists.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        info!(cache_dir = ?self.dir, "Cache initialized");
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Full path of the entry for `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    // == Get ==
    /// Reads the entry for `key`.
    ///
    /// Returns `Ok(None)` when no entry exists, including when the sweep
    /// removed it between the caller's request and this read.
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(data) => {
                info!(path = ?path, "Cache hit");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // == Put ==
    /// Writes `data` as the entry for `key`, replacing any existing file.
    ///
    /// The bytes land in a temp file first and are renamed into place, so
    /// readers see either the old entry, no entry, or the complete new one.
    pub async fn put(&self, key: &CacheKey, data: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(key);
        let temp = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            key.file_name(),
            process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        info!(path = ?path, size = data.len(), "Cached");
        Ok(path)
    }

    // == Sweep ==
    /// Deletes every file whose modification time is more than `retention` ago.
    ///
    /// Best-effort: a failure on one entry is logged and the rest are still
    /// evaluated. Returns the number of entries removed.
    pub async fn sweep_expired(&self, retention: Duration) -> usize {
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!(cache_dir = ?self.dir, error = %e, "Sweep could not list cache directory");
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;

        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Sweep stopped reading cache directory");
                    break;
                }
            };
            let path = entry.path();

            let modified = match entry.metadata().await.and_then(|m| {
                if m.is_file() {
                    m.modified().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(modified)) => modified,
                Ok(None) => continue,
                Err(e) => {
                    debug!(path = ?path, error = %e, "Skipping entry without usable metadata");
                    continue;
                }
            };

            // Future timestamps count as fresh
            let Ok(age) = now.duration_since(modified) else {
                continue;
            };
            if age <= retention {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    info!(file = ?entry.file_name(), age_secs = age.as_secs(), "Cleaned");
                    removed += 1;
                }
                Err(e) => warn!(path = ?path, error = %e, "Failed to remove expired entry"),
            }
        }

        self.stats.record_cleaned(removed as u64);
        removed
    }
}
