//! Keyword-filtered post watcher.
//!
//! This crate provides:
//! - Environment-driven settings
//! - Newest-post search over a Nitter-compatible front end
//! - JSON state of the last notified post
//! - A poll loop that pushes a notification for every new post

pub mod config;
pub mod monitor;
pub mod reconcile;
pub mod state;
pub mod twitter;

// Re-export main types
pub use config::MonitorSettings;
pub use monitor::{CycleOutcome, Monitor};
pub use reconcile::{reconcile, Reconciliation};
pub use state::{load_last_seen, PersistedState};
pub use twitter::{LatestPost, PostFetcher, SearchFetcher, SearchFilter};
