//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and a byte
//! budget.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, CapacityPolicy, Image, LruTracker};
use crate::error::{CacheError, Result};

// == Store Outcome ==
/// State of the cache right after a `put`, taken in the same critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Whether the stored key survived eviction
    pub cached: bool,
    /// Entries evicted by this put
    pub evicted: usize,
    /// Bytes held after the put
    pub cache_bytes: usize,
}

/// Rejects keys no entry can be stored under.
pub fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::invalid("Cache key cannot be empty"));
    }
    Ok(())
}

// == LRU Image Cache ==
/// Byte-budgeted image cache with least-recently-used eviction.
///
/// Entries are charged `width * height * bytes_per_pixel` bytes. After every
/// `put` the cache evicts least-recently-used entries until the total is back
/// within `capacity_bytes`.
///
/// This type is single-threaded; wrap it in
/// [`SharedImageCache`](crate::cache::SharedImageCache) to share it.
#[derive(Debug)]
pub struct LruImageCache {
    /// Key-image storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Sum of `byte_size` over live entries
    current_size: usize,
    /// Fixed byte budget
    capacity_bytes: usize,
}

impl LruImageCache {
    // == Constructor ==
    /// Creates an empty cache with an explicit byte budget.
    ///
    /// # Errors
    /// `InvalidArgument` if `capacity_bytes` is zero.
    pub fn new(capacity_bytes: usize) -> Result<Self> {
        if capacity_bytes == 0 {
            return Err(CacheError::invalid("Cache capacity must be positive"));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(capacity_bytes),
            current_size: 0,
            capacity_bytes,
        })
    }

    /// Creates an empty cache whose budget is resolved once from `policy`.
    pub fn with_policy(policy: &dyn CapacityPolicy) -> Result<Self> {
        Self::new(policy.capacity_bytes()?)
    }

    // == Get ==
    /// Looks up an image, promoting it to most-recently-used on a hit.
    ///
    /// The returned `Arc` is shared with the cache; the entry stays cached.
    pub fn get(&mut self, key: &str) -> Option<Arc<Image>> {
        match self.entries.get(key) {
            Some(entry) => {
                let image = Arc::clone(&entry.image);
                self.lru.touch(key);
                self.stats.record_hit();
                Some(image)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores an image under `key`, replacing any previous entry.
    ///
    /// The entry becomes most-recently-used, then least-recently-used entries
    /// are evicted until the budget holds. An image larger than the whole
    /// budget is accepted and immediately evicted along with everything else.
    ///
    /// # Errors
    /// `InvalidArgument` if `key` is empty.
    pub fn put(&mut self, key: impl Into<String>, image: Arc<Image>) -> Result<StoreOutcome> {
        let key = key.into();
        check_key(&key)?;

        let entry = CacheEntry::new(image);
        let byte_size = entry.byte_size;

        let replaced = match self.entries.insert(key.clone(), entry) {
            Some(previous) => {
                self.current_size -= previous.byte_size;
                true
            }
            None => false,
        };
        self.current_size += byte_size;
        self.lru.touch(&key);
        self.stats.record_store(replaced);

        if byte_size > self.capacity_bytes {
            warn!(
                key = %key,
                byte_size,
                capacity = self.capacity_bytes,
                "Image exceeds cache capacity and will be evicted immediately"
            );
        }

        let evicted = self.trim_to_capacity();
        self.stats.set_usage(self.entries.len(), self.current_size);

        // A surviving key is still at the head; eviction only removes from the tail.
        Ok(StoreOutcome {
            cached: self.lru.peek_newest() == Some(key.as_str()),
            evicted,
            cache_bytes: self.current_size,
        })
    }

    /// Evicts from the LRU end until `current_size <= capacity_bytes`.
    /// Returns the number of entries evicted.
    fn trim_to_capacity(&mut self) -> usize {
        let mut evicted_count = 0;
        while self.current_size > self.capacity_bytes {
            let Some(evicted_key) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&evicted_key) {
                self.current_size -= evicted.byte_size;
                self.stats.record_eviction();
                evicted_count += 1;
                debug!(
                    key = %evicted_key,
                    freed = evicted.byte_size,
                    remaining = self.current_size,
                    "Evicted least recently used image"
                );
            }
        }
        evicted_count
    }

    // == Size ==
    /// Bytes currently held (sum of live entry sizes).
    pub fn size(&self) -> usize {
        self.current_size
    }

    /// The fixed byte budget.
    pub fn capacity(&self) -> usize {
        self.capacity_bytes
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Contains ==
    /// Checks for a key without promoting it or touching statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Recency Order ==
    /// Cached keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(str::to_string).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.entries.len(), self.current_size);
        stats
    }
}
