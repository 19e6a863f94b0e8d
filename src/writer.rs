//! Headerless CSV output, one open-write-close cycle per batch.
//!
//! Uses the `csv` crate with `\n` record terminators and minimal quoting:
//! a field is quoted only when it contains a delimiter, quote, or newline.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::record::AddressRecord;

const WRITE_BUFFER: usize = 128 * 1024;

/// How a batch opens the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate. Used for the first batch of a run.
    Create,
    /// Append to the existing file.
    Append,
}

/// Serialize records as headerless CSV rows into any writer.
pub fn write_records<W: Write>(out: W, records: &[AddressRecord]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .buffer_capacity(WRITE_BUFFER)
        .from_writer(out);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one batch to `path`, creating or appending per `mode`.
pub fn write_batch(path: &Path, records: &[AddressRecord], mode: WriteMode) -> Result<()> {
    let file = match mode {
        WriteMode::Create => File::create(path),
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
    }
    .with_context(|| format!("failed to open output file: {}", path.display()))?;

    write_records(file, records)
        .with_context(|| format!("failed to write batch to: {}", path.display()))
}

/// Destination for flushed batches.
pub trait BatchSink {
    fn write_batch(&mut self, records: &[AddressRecord], mode: WriteMode) -> Result<()>;
}

/// Writes batches to a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BatchSink for CsvFileSink {
    fn write_batch(&mut self, records: &[AddressRecord], mode: WriteMode) -> Result<()> {
        write_batch(&self.path, records, mode)
    }
}
