//! Shared Cache Handle
//!
//! Thread-safe wrapper that serializes every operation through one mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, CapacityPolicy, Image, LruImageCache, StoreOutcome};
use crate::error::Result;
use crate::loader::ImageCache;

// == Shared Image Cache ==
/// Cloneable handle to one [`LruImageCache`].
///
/// Clones share the same underlying cache. Each call holds the lock for one
/// O(1) operation only.
#[derive(Debug, Clone)]
pub struct SharedImageCache {
    inner: Arc<Mutex<LruImageCache>>,
}

impl SharedImageCache {
    /// Wraps an existing cache.
    pub fn new(cache: LruImageCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Builds a cache with an explicit byte budget.
    pub fn with_capacity(capacity_bytes: usize) -> Result<Self> {
        LruImageCache::new(capacity_bytes).map(Self::new)
    }

    /// Builds a cache whose budget is resolved from `policy`.
    pub fn with_policy(policy: &dyn CapacityPolicy) -> Result<Self> {
        LruImageCache::with_policy(policy).map(Self::new)
    }

    // Poisoning is ignored: no operation panics between accounting updates.
    fn lock(&self) -> MutexGuard<'_, LruImageCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Arc<Image>> {
        self.lock().get(key)
    }

    /// Stores `image` and reports the resulting state from the same lock.
    pub fn put(&self, key: impl Into<String>, image: Arc<Image>) -> Result<StoreOutcome> {
        self.lock().put(key, image)
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

impl ImageCache for SharedImageCache {
    fn fetch(&self, key: &str) -> Option<Arc<Image>> {
        self.get(key)
    }

    fn store(&self, key: &str, image: Arc<Image>) -> Result<()> {
        self.put(key, image).map(|_| ())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ColorFormat, FixedCapacity};
    use std::thread;

    fn image_of(bytes: u32) -> Arc<Image> {
        Arc::new(Image::blank(bytes, 1, ColorFormat::Alpha8).unwrap())
    }

    #[test]
    fn test_clones_share_state() {
        let cache = SharedImageCache::with_capacity(1000).unwrap();
        let other = cache.clone();

        cache.put("A", image_of(100)).unwrap();

        assert!(other.get("A").is_some());
        assert_eq!(other.size(), 100);
    }

    #[test]
    fn test_put_outcome_matches_cache_state() {
        let cache = SharedImageCache::with_capacity(1000).unwrap();
        cache.put("A", image_of(600)).unwrap();

        let outcome = cache.put("B", image_of(600)).unwrap();

        assert!(outcome.cached);
        assert_eq!(outcome.evicted, 1);
        assert_eq!(outcome.cache_bytes, cache.size());
        assert!(!cache.contains("A"));
    }

    #[test]
    fn test_with_policy() {
        let cache = SharedImageCache::with_policy(&FixedCapacity(2048)).unwrap();
        assert_eq!(cache.capacity(), 2048);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_trait_contract() {
        let cache = SharedImageCache::with_capacity(1000).unwrap();
        let contract: &dyn ImageCache = &cache;

        assert!(contract.fetch("A").is_none());
        contract.store("A", image_of(10)).unwrap();
        assert!(contract.fetch("A").is_some());
        assert!(contract.store("", image_of(10)).is_err());
    }

    #[test]
    fn test_concurrent_puts_respect_budget() {
        let cache = SharedImageCache::with_capacity(10_000).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        cache.put(format!("t{}-{}", t, i), image_of(97)).unwrap();
                        let _ = cache.get(&format!("t{}-{}", t, i / 2));
                        assert!(cache.size() <= 10_000);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert!(stats.current_bytes <= 10_000);
        assert_eq!(stats.current_bytes, stats.total_entries * 97);
        assert_eq!(stats.stores, 1600);
    }
}
