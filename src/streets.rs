//! Street-name table: one name per line, read once and never mutated.

use anyhow::{Context, Result};
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text after a leading UTF-8 byte-order mark, if there is one.
fn without_bom(buf: &[u8]) -> &[u8] {
    buf.strip_prefix(UTF8_BOM).unwrap_or(buf)
}

/// Ordered list of street names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetNames {
    names: Vec<String>,
}

impl StreetNames {
    /// Load street names from a (possibly compressed) text file.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = crate::decompress::read_input(path)?;
        let names = Self::from_bytes(buf)
            .with_context(|| format!("failed to load street names: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            names = names.len(),
            "loaded street names"
        );
        Ok(names)
    }

    /// Split a buffer into names. Accepts `\n` and `\r\n` endings; blank
    /// lines are skipped and names are trimmed, so indices count only
    /// non-blank lines.
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self> {
        let buf = without_bom(&buf);
        let text = std::str::from_utf8(buf).context("street names are not valid UTF-8")?;

        let mut names = Vec::with_capacity(memchr::memchr_iter(b'\n', buf).count() + 1);
        let mut start = 0;
        for end in memchr::memchr_iter(b'\n', buf).chain(std::iter::once(buf.len())) {
            let name = text[start..end].trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
            start = end + 1;
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for StreetNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
