//! Cache Module
//!
//! Provides the on-disk image cache: key derivation, storage and expiry.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{content_type_for_extension, CacheKey, DEFAULT_EXTENSION};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
