//! Image Proxy - An HTTP image-fetching proxy with on-disk caching
//!
//! Fetches an image from its origin on first request, serves it from a local
//! cache afterwards, and sweeps stale entries in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
