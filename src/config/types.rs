use serde::Deserialize;
use std::fmt;

/// Listing endpoint used when no configuration overrides it
pub const DEFAULT_LISTING_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Number of detail records fetched by default
pub const DEFAULT_ITEM_COUNT: usize = 30;

/// Number of concurrent workers used by default
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Output file written by default
pub const DEFAULT_CSV_PATH: &str = "./pokemon.csv";

/// Main configuration structure for dex-harvest
///
/// Every section is optional; missing sections and keys fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root URL of the paginated listing endpoint
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fan-out configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// How many detail records to fetch
    #[serde(rename = "item-count")]
    pub item_count: usize,

    /// Degree of concurrency
    #[serde(rename = "worker-count")]
    pub worker_count: usize,

    /// How work is distributed across workers
    pub strategy: PoolStrategy,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            worker_count: DEFAULT_WORKER_COUNT,
            strategy: PoolStrategy::default(),
        }
    }
}

/// Work distribution strategy for the worker pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStrategy {
    /// Shared queue drained by a fixed set of workers; unordered results
    #[default]
    Queue,

    /// One task per URL gated by a semaphore; results keep input order
    Map,
}

impl fmt::Display for PoolStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolStrategy::Queue => write!(f, "queue"),
            PoolStrategy::Map => write!(f, "map"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
        }
    }
}
