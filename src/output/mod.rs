//! Output module for persisting harvested records
//!
//! Records are written once, after the fan-out has finished, as a CSV file
//! with a fixed header row.

mod csv_writer;

pub use csv_writer::{write_records, CsvWriter, HEADER};

use thiserror::Error;

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
