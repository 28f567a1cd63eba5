//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with size accounting.

use std::sync::Arc;

use crate::cache::Image;

// == Cache Entry ==
/// A stored image together with the bytes it is charged against the budget.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored image, shared with any caller holding a prior lookup result
    pub image: Arc<Image>,
    /// Footprint charged against the cache budget
    pub byte_size: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, computing its size from the image's pixel shape
    /// rather than any encoded form.
    pub fn new(image: Arc<Image>) -> Self {
        let byte_size = image.byte_size();
        Self { image, byte_size }
    }
}
