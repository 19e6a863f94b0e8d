use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use addrgen::config::Config;
use addrgen::generate::RemainderPolicy;
use addrgen::logging::LogLevel;
use addrgen::sampler::IndexPolicy;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Generate synthetic US mailing addresses as headerless CSV.
///
/// Street names come from a plain-text list; zip, city and state come from
/// the USPS ZIP Locale Detail file. With no options the run writes
/// 100,000,000 rows to RndAddr100MN_NoHeader.csv in batches of 100,000.
#[derive(Parser)]
#[command(name = "addrgen", version, about, long_about = None)]
#[command(args_override_self = true)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rows to generate
    #[arg(short = 'n', long)]
    rows: Option<u64>,

    /// Rows buffered in memory per write
    #[arg(short = 'c', long)]
    chunk_size: Option<usize>,

    /// ZIP reference CSV (may be .gz or .zst)
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Street-name list, one per line (may be .gz or .zst)
    #[arg(long)]
    street_names: Option<PathBuf>,

    /// Output CSV path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// What to do with a final batch smaller than the chunk size
    #[arg(long, value_enum)]
    remainder: Option<RemainderPolicy>,

    /// Whether the first entry of each table may be sampled
    #[arg(long, value_enum)]
    index_policy: Option<IndexPolicy>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(rows) = self.rows {
            config.total_rows = rows;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(path) = self.reference {
            config.reference_path = path;
        }
        if let Some(path) = self.street_names {
            config.street_names_path = path;
        }
        if let Some(path) = self.output {
            config.output_path = path;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(remainder) = self.remainder {
            config.remainder = remainder;
        }
        if let Some(policy) = self.index_policy {
            config.index_policy = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    addrgen::logging::init_logging(cli.log_level)?;

    let config = cli.into_config()?;
    let summary = addrgen::generate::execute(&config)?;

    tracing::info!(
        rows_written = summary.rows_written,
        rows_discarded = summary.rows_discarded,
        batches = summary.batches_written,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        rows_per_sec = summary.rows_per_sec() as u64,
        output = %config.output_path.display(),
        "done"
    );

    Ok(())
}
