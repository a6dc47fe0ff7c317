//! CSV serialization of harvested records

use crate::output::{OutputError, OutputResult};
use crate::record::Record;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row written at the top of every output file
pub const HEADER: [&str; 4] = ["id", "name", "type_1", "type_2"];

/// Row writer over any `io::Write`
///
/// The header is emitted on construction, so even an empty record set
/// produces a well-formed file.
pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl CsvWriter<File> {
    /// Creates or truncates the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wraps a writer and emits the header row
    pub fn from_writer(writer: W) -> OutputResult<Self> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        inner.write_record(HEADER)?;
        Ok(Self { inner, rows: 0 })
    }

    /// Appends one data row
    pub fn write(&mut self, record: &Record) -> OutputResult<()> {
        self.inner.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows and returns the underlying writer
    pub fn finish(self) -> OutputResult<W> {
        self.inner
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

/// Writes `records` to `destination` in the order given
///
/// # Arguments
///
/// * `records` - Records to write, one row each
/// * `destination` - File to create or truncate
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written; the file is flushed and closed
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_records(records: &[Record], destination: &Path) -> OutputResult<usize> {
    let mut writer = CsvWriter::create(destination)?;
    for record in records {
        writer.write(record)?;
    }

    let rows = writer.rows();
    let mut file = writer.finish()?;
    file.flush()?;

    tracing::debug!("Wrote {} rows to {}", rows, destination.display());
    Ok(rows)
}
