//! Harvest coordinator - end-to-end run orchestration
//!
//! The three phases run strictly in sequence:
//! 1. Discovery walks the listing until enough detail URLs are known
//! 2. The worker pool fetches every detail record concurrently
//! 3. The collected records are written to the CSV file
//!
//! The first error in any phase aborts the run. Nothing is written unless
//! discovery and every fetch succeeded.

use crate::config::{validate, Config};
use crate::fetch::{build_http_client, DetailFetcher, ListingFetcher};
use crate::harvest::pool::WorkerPool;
use crate::harvest::summary::HarvestSummary;
use crate::output::write_records;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Main harvest coordinator structure
pub struct Harvester {
    config: Arc<Config>,
    listing: ListingFetcher,
    detail: Arc<DetailFetcher>,
    pool: WorkerPool,
}

impl Harvester {
    /// Creates a new harvester from configuration
    ///
    /// Validates the configuration and builds the shared HTTP client; no
    /// request is sent yet.
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config.source)?;
        let listing = ListingFetcher::new(client.clone(), config.source.listing_url.clone());
        let detail = Arc::new(DetailFetcher::new(client));
        let pool = WorkerPool::new(config.harvest.worker_count, config.harvest.strategy);

        Ok(Self {
            config: Arc::new(config),
            listing,
            detail,
            pool,
        })
    }

    /// Runs discovery, fan-out, and write
    pub async fn run(&self) -> Result<HarvestSummary> {
        let start_time = Instant::now();
        let item_count = self.config.harvest.item_count;

        tracing::info!(
            "Discovering {} items from {}",
            item_count,
            self.listing.root_url()
        );
        let urls = self.listing.fetch(item_count).await?;
        let urls_discovered = urls.len();

        tracing::info!(
            "Fetching {} detail records with {} workers ({} strategy)",
            urls_discovered,
            self.pool.worker_count(),
            self.pool.strategy()
        );
        let detail = Arc::clone(&self.detail);
        let records = self
            .pool
            .run(urls, move |url: String| {
                let detail = Arc::clone(&detail);
                async move { detail.fetch(&url).await }
            })
            .await?;
        tracing::trace!("Collected records: {:?}", records);

        let output_path = PathBuf::from(&self.config.output.csv_path);
        tracing::info!(
            "Writing {} records to {}",
            records.len(),
            output_path.display()
        );
        let records_written = write_records(&records, &output_path)?;

        let summary = HarvestSummary {
            urls_discovered,
            records_written,
            worker_count: self.pool.worker_count(),
            strategy: self.pool.strategy(),
            output_path,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Harvest completed: {} records in {:?}",
            summary.records_written,
            summary.elapsed
        );

        Ok(summary)
    }
}

/// Runs a complete harvest from configuration
pub async fn run_harvest(config: Config) -> Result<HarvestSummary> {
    Harvester::new(config)?.run().await
}
