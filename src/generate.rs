//! Driving loop: sample into a bounded buffer, flush it when full.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::record::AddressRecord;
use crate::reference::ReferenceData;
use crate::sampler::Sampler;
use crate::streets::StreetNames;
use crate::writer::{BatchSink, CsvFileSink, WriteMode};

/// Log an info-level progress line every this many batches.
const PROGRESS_EVERY: u64 = 100;

/// Handling of a final batch smaller than the chunk size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderPolicy {
    /// Write the partial batch so the file holds exactly `total_rows` lines.
    #[default]
    Flush,
    /// Drop it; only whole chunks reach the file.
    Discard,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_generated: u64,
    pub rows_written: u64,
    pub rows_discarded: u64,
    pub batches_written: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows_written as f64 / secs
        } else {
            0.0
        }
    }
}

/// Load both tables, build a sampler, and write `config.total_rows` rows to
/// `config.output_path`.
pub fn execute(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    let reference = ReferenceData::load(&config.reference_path)?;
    let streets = StreetNames::load(&config.street_names_path)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sampler = Sampler::new(&reference, &streets, rng, config.index_policy)?;
    let mut sink = CsvFileSink::new(&config.output_path);

    tracing::info!(
        output = %config.output_path.display(),
        total_rows = config.total_rows,
        chunk_size = config.chunk_size,
        "generating addresses"
    );
    run(config, &mut sampler, &mut sink)
}

/// Generate `config.total_rows` records, flushing every `config.chunk_size`.
///
/// The first flush creates the output, later flushes append. The buffer
/// never holds more than one chunk.
pub fn run<R: Rng, S: BatchSink>(
    config: &Config,
    sampler: &mut Sampler<'_, R>,
    sink: &mut S,
) -> Result<RunSummary> {
    config.validate()?;
    let start = Instant::now();
    let chunk_size = config.chunk_size;
    let capacity = usize::try_from(config.total_rows).map_or(chunk_size, |n| n.min(chunk_size));

    let mut batch = Batch {
        records: Vec::with_capacity(capacity),
        mode: WriteMode::Create,
        start,
    };
    let mut summary = RunSummary::default();

    for _ in 0..config.total_rows {
        batch.records.push(sampler.generate());
        summary.rows_generated += 1;
        if batch.records.len() >= chunk_size {
            batch.flush(sink, &mut summary)?;
        }
    }

    if !batch.records.is_empty() {
        match config.remainder {
            RemainderPolicy::Flush => batch.flush(sink, &mut summary)?,
            RemainderPolicy::Discard => {
                summary.rows_discarded = batch.records.len() as u64;
                tracing::warn!(
                    rows = summary.rows_discarded,
                    "discarding final partial batch"
                );
                batch.records.clear();
            }
        }
    }

    // A run that flushed nothing still leaves a fresh, empty output file.
    if summary.batches_written == 0 {
        sink.write_batch(&[], WriteMode::Create)?;
    }

    summary.elapsed = start.elapsed();
    Ok(summary)
}

struct Batch {
    records: Vec<AddressRecord>,
    mode: WriteMode,
    start: Instant,
}

impl Batch {
    fn flush<S: BatchSink>(&mut self, sink: &mut S, summary: &mut RunSummary) -> Result<()> {
        sink.write_batch(&self.records, self.mode)?;
        summary.rows_written += self.records.len() as u64;
        summary.batches_written += 1;
        tracing::debug!(
            batch = summary.batches_written,
            rows = self.records.len(),
            mode = ?self.mode,
            "flushed batch"
        );
        if summary.batches_written % PROGRESS_EVERY == 0 {
            let secs = self.start.elapsed().as_secs_f64();
            tracing::info!(
                rows_written = summary.rows_written,
                rows_per_sec = (summary.rows_written as f64 / secs.max(f64::EPSILON)) as u64,
                "progress"
            );
        }
        self.mode = WriteMode::Append;
        self.records.clear();
        Ok(())
    }
}
