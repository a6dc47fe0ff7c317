//! Configuration module for dex-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at this level: callers fall back to
//! [`Config::default`], which carries the built-in constants.
//!
//! # Example
//!
//! ```no_run
//! use dex_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Workers: {}", config.harvest.worker_count);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HarvestConfig, OutputConfig, PoolStrategy, SourceConfig, DEFAULT_CSV_PATH,
    DEFAULT_ITEM_COUNT, DEFAULT_LISTING_URL, DEFAULT_WORKER_COUNT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
