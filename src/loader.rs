//! Image Loader
//!
//! The contract a request dispatcher uses to consult and populate an image
//! cache, and a small loader built on it: check the cache, fetch on a miss,
//! store the result.
//!
//! Transport is injected as an async closure; this module never performs I/O
//! itself.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::cache::{check_key, Image};
use crate::error::Result;

// == Image Cache Contract ==
/// Lookup-or-miss and store, as consumed by an image-loading collaborator.
pub trait ImageCache: Send + Sync {
    /// Returns the cached image for `key`, or `None` on a miss.
    fn fetch(&self, key: &str) -> Option<Arc<Image>>;

    /// Populates the cache after a successful fetch.
    fn store(&self, key: &str, image: Arc<Image>) -> Result<()>;
}

impl<C: ImageCache + ?Sized> ImageCache for Arc<C> {
    fn fetch(&self, key: &str) -> Option<Arc<Image>> {
        (**self).fetch(key)
    }

    fn store(&self, key: &str, image: Arc<Image>) -> Result<()> {
        (**self).store(key, image)
    }
}

// == Image Loader ==
/// Cache-first image loader.
///
/// `component` tags every diagnostic the loader emits so log lines can be
/// attributed to the caller that owns this loader.
#[derive(Debug, Clone)]
pub struct ImageLoader<C> {
    cache: C,
    component: String,
}

impl<C: ImageCache> ImageLoader<C> {
    pub fn new(cache: C, component: impl Into<String>) -> Self {
        Self {
            cache,
            component: component.into(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    // == Load ==
    /// Returns the cached image for `key`, or runs `fetch` and caches its
    /// result.
    ///
    /// Fetch failures are returned with the key attached and nothing is
    /// cached. An empty key is rejected before `fetch` is called.
    pub async fn load<F, Fut>(&self, key: &str, fetch: F) -> anyhow::Result<Arc<Image>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = anyhow::Result<Image>>,
    {
        check_key(key)?;

        if let Some(image) = self.cache.fetch(key) {
            debug!(component = %self.component, key, "Image cache hit");
            return Ok(image);
        }

        debug!(component = %self.component, key, "Image cache miss, dispatching fetch");
        let image = fetch(key.to_string())
            .await
            .with_context(|| format!("Failed to fetch image '{}'", key))?;
        let image = Arc::new(image);

        self.cache.store(key, Arc::clone(&image))?;
        info!(
            component = %self.component,
            key,
            bytes = image.byte_size(),
            "Fetched and cached image"
        );

        Ok(image)
    }
}
