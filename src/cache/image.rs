//! Decoded Image Module
//!
//! Defines the in-memory image representation held by the cache and the
//! pixel formats it understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Color Format ==
/// Pixel layout of a decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    /// Single 8-bit alpha channel
    Alpha8,
    /// 16-bit packed RGB (5-6-5)
    Rgb565,
    /// 16-bit packed ARGB (4-4-4-4)
    Argb4444,
    /// 32-bit ARGB, 8 bits per channel
    #[default]
    Argb8888,
    /// 64-bit RGBA, half-float per channel
    RgbaF16,
}

impl ColorFormat {
    /// Number of bytes one pixel occupies in memory.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::Alpha8 => 1,
            ColorFormat::Rgb565 | ColorFormat::Argb4444 => 2,
            ColorFormat::Argb8888 => 4,
            ColorFormat::RgbaF16 => 8,
        }
    }

    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorFormat::Alpha8 => "alpha8",
            ColorFormat::Rgb565 => "rgb565",
            ColorFormat::Argb4444 => "argb4444",
            ColorFormat::Argb8888 => "argb8888",
            ColorFormat::RgbaF16 => "rgba_f16",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorFormat {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alpha8" => Ok(ColorFormat::Alpha8),
            "rgb565" => Ok(ColorFormat::Rgb565),
            "argb4444" => Ok(ColorFormat::Argb4444),
            "argb8888" => Ok(ColorFormat::Argb8888),
            "rgba_f16" | "rgbaf16" => Ok(ColorFormat::RgbaF16),
            other => Err(CacheError::invalid(format!("Unknown color format '{}'", other))),
        }
    }
}

// == Image ==
/// A decoded image: dimensions, pixel format and raw pixel memory.
///
/// The pixel buffer always holds exactly `width * height * bytes_per_pixel`
/// bytes, so [`Image::byte_size`] is both the memory footprint and the buffer
/// length.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: ColorFormat,
    pixels: Vec<u8>,
}

impl Image {
    // == Constructor ==
    /// Wraps an already decoded pixel buffer.
    ///
    /// # Errors
    /// `InvalidArgument` if either dimension is zero or the buffer length
    /// does not match the dimensions and format.
    pub fn new(width: u32, height: u32, format: ColorFormat, pixels: Vec<u8>) -> Result<Self> {
        let expected = footprint(width, height, format)?;
        if pixels.len() != expected {
            return Err(CacheError::invalid(format!(
                "Pixel buffer is {} bytes, expected {} for {}x{} {}",
                pixels.len(),
                expected,
                width,
                height,
                format
            )));
        }

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Allocates a zero-filled image of the given shape.
    pub fn blank(width: u32, height: u32, format: ColorFormat) -> Result<Self> {
        let len = footprint(width, height, format)?;
        Self::new(width, height, format, vec![0; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    // == Byte Size ==
    /// In-memory footprint: `width * height * bytes_per_pixel`.
    pub fn byte_size(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}

// Pixel data is left out of Debug output.
impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("byte_size", &self.byte_size())
            .finish()
    }
}

fn footprint(width: u32, height: u32, format: ColorFormat) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CacheError::invalid(format!(
            "Image dimensions must be positive, got {}x{}",
            width, height
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(format.bytes_per_pixel()))
        .ok_or_else(|| {
            CacheError::invalid(format!("Image {}x{} {} is too large", width, height, format))
        })
}
