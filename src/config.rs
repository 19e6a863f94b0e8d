//! Run configuration.
//!
//! Every option has a default matching the historical fixed constants, so an
//! empty config file (or none at all) reproduces the 100M-row run. A TOML
//! file may override any subset; command-line flags override the file.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generate::RemainderPolicy;
use crate::sampler::IndexPolicy;

pub const DEFAULT_TOTAL_ROWS: u64 = 100_000_000;
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
pub const DEFAULT_REFERENCE_PATH: &str = "ZIP_Locale_Detail.csv";
pub const DEFAULT_STREET_NAMES_PATH: &str = "CommonStreetNames.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "RndAddr100MN_NoHeader.csv";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Rows to generate.
    pub total_rows: u64,
    /// Records buffered in memory before each write.
    pub chunk_size: usize,
    pub reference_path: PathBuf,
    pub street_names_path: PathBuf,
    pub output_path: PathBuf,
    /// What to do with a final batch smaller than `chunk_size`.
    pub remainder: RemainderPolicy,
    pub index_policy: IndexPolicy,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_rows: DEFAULT_TOTAL_ROWS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            street_names_path: PathBuf::from(DEFAULT_STREET_NAMES_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            remainder: RemainderPolicy::default(),
            index_policy: IndexPolicy::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk-size must be at least 1");
        }
        Ok(())
    }
}
