//! Run orchestration: configuration, statistics, and the sequential
//! coordinator loop.

mod config;
mod coordinator;
mod stats;

pub use config::{DEFAULT_API_BASE, DEFAULT_CATALOG_URL, DEFAULT_DELAY, RunConfig};
pub use coordinator::{Coordinator, RunReport};
pub use stats::RunStats;
