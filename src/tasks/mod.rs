//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry Sweep: Deletes cache entries older than the retention window

mod cleanup;

pub use cleanup::spawn_cleanup_task;
