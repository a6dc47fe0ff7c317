//! dex-harvest: concurrent detail harvester for paginated JSON listings
//!
//! This crate walks a paginated listing endpoint to discover detail URLs,
//! fetches every detail record with a fixed pool of workers, and writes the
//! collected records to a CSV file.

pub mod config;
pub mod fetch;
pub mod harvest;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for dex-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Errors raised while talking to the remote API
///
/// Every variant is fatal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Unexpected response shape from {url}: {message}")]
    Shape { url: String, message: String },

    #[error("Listing ended after {found} of {wanted} items")]
    Exhausted { found: usize, wanted: usize },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for dex-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for remote API operations
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{harvest, HarvestSummary, Harvester, WorkerPool};
pub use record::Record;
