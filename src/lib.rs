//! Image LRU - A byte-budgeted in-memory cache for decoded images
//!
//! Entries are charged by pixel footprint and evicted least-recently-used
//! first. The cache is constructed explicitly and handed to whoever needs it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{ColorFormat, Image, LruImageCache, SharedImageCache, StoreOutcome};
pub use config::Config;
pub use error::{CacheError, Result};
pub use loader::{ImageCache, ImageLoader};
pub use tasks::spawn_usage_reporter;
