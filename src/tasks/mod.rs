//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Usage report: logs cache occupancy and hit rate at a configured interval

mod report;

pub use report::spawn_usage_reporter;
