//! Cache Module
//!
//! Provides a byte-budgeted in-memory image cache with LRU eviction.

mod entry;
mod image;
mod lru;
mod policy;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use image::{ColorFormat, Image};
pub use lru::LruTracker;
pub use policy::{available_memory, CapacityPolicy, FixedCapacity, FractionOfMemory};
pub use shared::SharedImageCache;
pub use stats::CacheStats;
pub use store::{check_key, LruImageCache, StoreOutcome};

// == Public Constants ==
/// Default share of available memory given to a cache (one-eighth)
pub const DEFAULT_MEMORY_DIVISOR: usize = 8;
