//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! byte usage.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of entries evicted to stay within the byte budget
    pub evictions: u64,
    /// Number of `put` calls accepted
    pub stores: u64,
    /// Number of `put` calls that replaced an existing key
    pub replacements: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Bytes currently held
    pub current_bytes: usize,
    /// Configured byte budget
    pub capacity_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats for a cache with the given budget.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Utilization ==
    /// Fraction of the byte budget in use.
    pub fn utilization(&self) -> f64 {
        if self.capacity_bytes == 0 {
            0.0
        } else {
            self.current_bytes as f64 / self.capacity_bytes as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Store ==
    /// Counts an accepted `put`, noting whether it replaced a key.
    pub fn record_store(&mut self, replaced: bool) {
        self.stores += 1;
        if replaced {
            self.replacements += 1;
        }
    }

    // == Update Usage ==
    /// Updates the entry count and byte usage snapshot.
    pub fn set_usage(&mut self, entries: usize, bytes: usize) {
        self.total_entries = entries;
        self.current_bytes = bytes;
    }
}
