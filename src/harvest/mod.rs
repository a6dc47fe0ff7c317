//! Harvest module: discovery, concurrent fetch, and write
//!
//! This module contains the orchestration logic, including:
//! - The fixed-size worker pool that drains the URL queue
//! - The coordinator that sequences discovery, fan-out, and output
//! - The end-of-run summary

mod coordinator;
mod pool;
mod summary;

pub use coordinator::{run_harvest, Harvester};
pub use pool::{UrlQueue, WorkerPool};
pub use summary::HarvestSummary;

use crate::config::Config;
use crate::Result;

/// Runs a complete harvest operation
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Walk the listing until `item_count` detail URLs are known
/// 3. Fetch every detail record with `worker_count` workers
/// 4. Write the records to the configured CSV file
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - Harvest completed and the file is written
/// * `Err(HarvestError)` - Harvest aborted at the first failure
pub async fn harvest(config: Config) -> Result<HarvestSummary> {
    run_harvest(config).await
}
