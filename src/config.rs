//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{CapacityPolicy, FixedCapacity, FractionOfMemory, DEFAULT_MEMORY_DIVISOR};

/// Default HTTP upload limit (64 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit cache budget in bytes; `None` selects the memory-fraction policy
    pub capacity_bytes: Option<usize>,
    /// Divisor applied to available memory when no explicit budget is set
    pub memory_divisor: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Usage report interval in seconds
    pub stats_interval: u64,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY_BYTES` - Explicit byte budget (default: unset, use memory fraction)
    /// - `CACHE_MEMORY_DIVISOR` - Fraction divisor of available memory (default: 8)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Usage report frequency in seconds (default: 60)
    /// - `MAX_UPLOAD_BYTES` - Upload body limit (default: 64 MiB)
    ///
    /// Zero or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity_bytes: positive_var("CACHE_CAPACITY_BYTES"),
            memory_divisor: positive_var("CACHE_MEMORY_DIVISOR").unwrap_or(defaults.memory_divisor),
            server_port: env_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_interval: positive_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
            max_upload_bytes: positive_var("MAX_UPLOAD_BYTES")
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// The budget policy this configuration selects.
    pub fn capacity_policy(&self) -> Box<dyn CapacityPolicy> {
        match self.capacity_bytes {
            Some(bytes) => Box::new(FixedCapacity(bytes)),
            None => Box::new(FractionOfMemory::new(self.memory_divisor)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_bytes: None,
            memory_divisor: DEFAULT_MEMORY_DIVISOR,
            server_port: 3000,
            stats_interval: 60,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn env_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn positive_var<T: FromStr + Default + PartialEq>(name: &str) -> Option<T> {
    env_var(name).filter(|v: &T| *v != T::default())
}
