//! Request DTOs for the image cache API
//!
//! Defines the shape of incoming HTTP requests.

use serde::Deserialize;

use crate::cache::{ColorFormat, Image};
use crate::error::{CacheError, Result};

/// Query parameters for storing an image (PUT /images/:key)
///
/// The request body carries the raw decoded pixels.
///
/// # Fields
/// - `width`, `height`: pixel dimensions
/// - `format`: color format name (default: `argb8888`)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreImageQuery {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub format: Option<String>,
}

impl StoreImageQuery {
    /// Parses the requested color format, defaulting to ARGB8888.
    pub fn color_format(&self) -> Result<ColorFormat> {
        match &self.format {
            Some(name) => name.parse(),
            None => Ok(ColorFormat::default()),
        }
    }

    /// Builds the image described by this query around `pixels`.
    pub fn into_image(self, pixels: Vec<u8>) -> Result<Image> {
        let format = self.color_format()?;
        Image::new(self.width, self.height, format, pixels)
    }
}

/// Validates a cache key taken from the request path.
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(CacheError::invalid("Key cannot be empty"));
    }
    Ok(())
}
