//! End-of-run summary

use crate::config::PoolStrategy;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// What a completed harvest produced
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// Detail URLs collected from the listing
    pub urls_discovered: usize,

    /// Data rows written to the output file
    pub records_written: usize,

    pub worker_count: usize,
    pub strategy: PoolStrategy,

    /// File the records were written to
    pub output_path: PathBuf,

    /// Wall-clock time for the whole run
    pub elapsed: Duration,
}

impl HarvestSummary {
    /// Records fetched per second, or zero for an instantaneous run
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.records_written as f64 / secs
    }
}

impl fmt::Display for HarvestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Harvest Summary ===")?;
        writeln!(f, "  URLs discovered: {}", self.urls_discovered)?;
        writeln!(f, "  Records written: {}", self.records_written)?;
        writeln!(
            f,
            "  Workers: {} ({} strategy)",
            self.worker_count, self.strategy
        )?;
        writeln!(
            f,
            "  Elapsed: {:.2}s ({:.2} records/sec)",
            self.elapsed.as_secs_f64(),
            self.throughput()
        )?;
        write!(f, "  Output: {}", self.output_path.display())
    }
}
