//! ZIP reference data: delivery zip code → physical city/state.
//!
//! The source is the USPS "ZIP Locale Detail" export, a CSV with a header
//! row. Only three columns drive generation; the rest are parsed when
//! present so the row type documents the whole file.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Read;
use std::path::Path;

/// Largest zip code that still renders as exactly five digits.
pub const MAX_ZIP: u32 = 99_999;

/// One row of the locale-detail file, columns matched by header name.
#[derive(Debug, Clone, Deserialize)]
pub struct ZipLocaleRow {
    #[serde(rename = "AREA NAME", default)]
    pub area_name: Option<String>,
    #[serde(rename = "AREA CODE", default)]
    pub area_code: Option<String>,
    #[serde(rename = "DISTRICT NAME", default)]
    pub district_name: Option<String>,
    #[serde(rename = "DISTRICT NO", default)]
    pub district_no: Option<String>,
    #[serde(rename = "DELIVERY ZIPCODE")]
    pub delivery_zipcode: String,
    #[serde(rename = "LOCALE NAME", default)]
    pub locale_name: Option<String>,
    #[serde(rename = "PHYSICAL DELV ADDR", default)]
    pub physical_delivery_address: Option<String>,
    #[serde(rename = "PHYSICAL CITY")]
    pub physical_city: String,
    #[serde(rename = "PHYSICAL STATE")]
    pub physical_state: String,
    #[serde(rename = "PHYSICAL ZIP", default)]
    pub physical_zip: Option<String>,
    #[serde(rename = "PHYSICAL ZIP 4", default)]
    pub physical_zip4: Option<String>,
}

impl ZipLocaleRow {
    /// Reduce the row to the fields the sampler needs.
    ///
    /// Fails if the delivery zip code is not an integer in `0..=99999`.
    pub fn into_zip_record(self) -> Result<ZipRecord> {
        let raw = self.delivery_zipcode.trim();
        let zip_code: u32 = raw
            .parse()
            .with_context(|| format!("invalid DELIVERY ZIPCODE: {raw:?}"))?;
        if zip_code > MAX_ZIP {
            bail!("DELIVERY ZIPCODE out of range (more than five digits): {zip_code}");
        }
        Ok(ZipRecord {
            zip_code,
            city: self.physical_city,
            state: self.physical_state,
        })
    }
}

/// A zip code with the city and state it delivers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipRecord {
    pub zip_code: u32,
    pub city: String,
    pub state: String,
}

/// City/state pair stored per zip code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub city: String,
    pub state: String,
}

/// Immutable lookup table built once at startup and borrowed by the sampler.
///
/// `zips` holds the distinct zip codes in first-occurrence order; every
/// entry has a matching key in `by_zip`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    by_zip: HashMap<u32, Locale>,
    zips: Vec<u32>,
}

impl ReferenceData {
    /// Load the reference table from a (possibly compressed) CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = crate::decompress::open_input(path)?;
        let data = Self::from_reader(reader)
            .with_context(|| format!("failed to load reference data: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            zips = data.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    /// Parse reference CSV from any reader. Any malformed row aborts the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut data = Self::default();
        let mut duplicates = 0usize;
        for (idx, row) in csv.deserialize::<ZipLocaleRow>().enumerate() {
            // Header is line 1.
            let line = idx + 2;
            let record = row
                .with_context(|| format!("malformed reference row at line {line}"))?
                .into_zip_record()
                .with_context(|| format!("malformed reference row at line {line}"))?;
            if !data.insert(record) {
                duplicates += 1;
            }
        }

        if data.is_empty() {
            bail!("reference data contains no rows");
        }
        if duplicates > 0 {
            tracing::debug!(duplicates, "ignored duplicate zip codes");
        }
        Ok(data)
    }

    /// Build a table from records already in memory. First occurrence of a
    /// zip code wins.
    pub fn from_records(records: impl IntoIterator<Item = ZipRecord>) -> Self {
        let mut data = Self::default();
        for record in records {
            data.insert(record);
        }
        data
    }

    /// Insert a record unless its zip code is already present. Returns
    /// whether the record was kept.
    fn insert(&mut self, record: ZipRecord) -> bool {
        match self.by_zip.entry(record.zip_code) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Locale {
                    city: record.city,
                    state: record.state,
                });
                self.zips.push(record.zip_code);
                true
            }
        }
    }

    /// Number of distinct zip codes.
    pub fn len(&self) -> usize {
        self.zips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zips.is_empty()
    }

    /// Distinct zip codes in first-occurrence order.
    pub fn zips(&self) -> &[u32] {
        &self.zips
    }

    pub fn lookup(&self, zip: u32) -> Option<&Locale> {
        self.by_zip.get(&zip)
    }
}
