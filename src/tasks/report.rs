//! Usage Report Task
//!
//! Background task that periodically logs cache occupancy. The cache itself
//! never schedules work; this task only reads a stats snapshot.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, SharedImageCache};

/// Spawns a background task that logs cache usage every `interval_secs`.
///
/// Identical consecutive snapshots are logged at `debug` only.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedImageCache::with_capacity(64 * 1024 * 1024)?;
/// let report_handle = spawn_usage_reporter(cache.clone(), 60);
/// // Later, during shutdown:
/// report_handle.abort();
/// ```
pub fn spawn_usage_reporter(cache: SharedImageCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting cache usage reporter with interval of {:?}", interval);

        let mut last: Option<CacheStats> = None;
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            if last.as_ref() == Some(&stats) {
                debug!("Cache usage unchanged: {} bytes", stats.current_bytes);
                continue;
            }

            info!(
                entries = stats.total_entries,
                bytes = stats.current_bytes,
                capacity = stats.capacity_bytes,
                evictions = stats.evictions,
                hit_rate = stats.hit_rate(),
                "Cache usage {:.1}%",
                stats.utilization() * 100.0
            );
            last = Some(stats);
        }
    })
}
