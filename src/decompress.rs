//! Transparent decompression for gzip and zstd compressed inputs.
//!
//! Detects compression by file extension (.gz → gzip, .zst/.zstd → zstd).
//! Reference and street-name files are read through [`open_input`], so both
//! can be shipped compressed without a separate unpack step.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Compression format detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zstd,
}

/// Detect the compression format from the path's extension.
pub fn detect(path: &Path) -> Compression {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz" | "gzip") => Compression::Gzip,
        Some("zst" | "zstd") => Compression::Zstd,
        _ => Compression::None,
    }
}

/// Open a file for streaming reads, decompressing on the fly when the
/// extension says so.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("failed to open file: {}", path.display()))?;
    let compression = detect(path);
    tracing::debug!(path = %path.display(), ?compression, "opening input");
    let reader: Box<dyn Read> = match compression {
        Compression::None => Box::new(BufReader::new(file)),
        Compression::Gzip => Box::new(flate2::read::MultiGzDecoder::new(BufReader::new(file))),
        Compression::Zstd => Box::new(zstd::Decoder::new(file).with_context(|| {
            format!("failed to initialize zstd decoder for: {}", path.display())
        })?),
    };
    Ok(reader)
}

/// Read a whole (possibly compressed) file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut reader = open_input(path)?;
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(buf)
}
