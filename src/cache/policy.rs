//! Capacity Policy Module
//!
//! Decides the byte budget a cache is built with. Policies are consulted once,
//! at construction; the budget never changes afterwards.

use sysinfo::System;
use tracing::info;

use crate::cache::DEFAULT_MEMORY_DIVISOR;
use crate::error::{CacheError, Result};

// == Capacity Policy ==
/// Source of a cache's byte budget.
pub trait CapacityPolicy {
    /// Resolves the budget in bytes.
    fn capacity_bytes(&self) -> Result<usize>;
}

// == Fixed Capacity ==
/// An explicit, deterministic budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCapacity(pub usize);

impl CapacityPolicy for FixedCapacity {
    fn capacity_bytes(&self) -> Result<usize> {
        if self.0 == 0 {
            return Err(CacheError::invalid("Cache capacity must be positive"));
        }
        Ok(self.0)
    }
}

// == Fraction Of Memory ==
/// A budget of `available_memory / divisor`, sampled when the policy is
/// resolved.
#[derive(Debug, Clone, Copy)]
pub struct FractionOfMemory {
    divisor: usize,
    memory_source: fn() -> u64,
}

impl FractionOfMemory {
    /// Uses the host's currently available memory.
    pub fn new(divisor: usize) -> Self {
        Self::with_memory_source(divisor, available_memory)
    }

    /// Reads available memory (bytes) from `memory_source` instead.
    pub fn with_memory_source(divisor: usize, memory_source: fn() -> u64) -> Self {
        Self {
            divisor,
            memory_source,
        }
    }

    pub fn divisor(&self) -> usize {
        self.divisor
    }
}

impl Default for FractionOfMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_DIVISOR)
    }
}

impl CapacityPolicy for FractionOfMemory {
    fn capacity_bytes(&self) -> Result<usize> {
        if self.divisor == 0 {
            return Err(CacheError::invalid("Memory divisor must be positive"));
        }

        let available = (self.memory_source)();
        let budget = usize::try_from(available / self.divisor as u64).unwrap_or(usize::MAX);
        if budget == 0 {
            return Err(CacheError::invalid(format!(
                "Available memory ({} bytes) is too small for a 1/{} budget",
                available, self.divisor
            )));
        }

        info!(
            available_bytes = available,
            divisor = self.divisor,
            budget_bytes = budget,
            "Resolved cache budget from available memory"
        );
        Ok(budget)
    }
}

/// Memory currently available to the process, in bytes.
///
/// Inside a cgroup with a memory limit the limit's free memory caps the
/// host figure.
pub fn available_memory() -> u64 {
    let mut sys = System::new();
    sys.refresh_memory();
    let cgroup_free = sys.cgroup_limits().map(|limits| limits.free_memory);
    effective_available(sys.available_memory(), cgroup_free)
}

fn effective_available(host_available: u64, cgroup_free: Option<u64>) -> u64 {
    match cgroup_free {
        Some(free) => free.min(host_available),
        None => host_available,
    }
}
