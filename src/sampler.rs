//! Random address assembly from the reference and street-name tables.

use anyhow::{Result, bail};
use rand::Rng;
use serde::Deserialize;
use std::ops::Range;

use crate::record::{AddressRecord, format_zip, format_zip4};
use crate::reference::ReferenceData;
use crate::streets::StreetNames;

/// Street numbers are drawn from `1..99999` (99998 is the largest).
pub const STREET_NUMBER_RANGE: Range<u32> = 1..99_999;

/// Zip+4 extensions are drawn from `1..9999` (9998 is the largest).
pub const ZIP4_RANGE: Range<u32> = 1..9_999;

/// Which table indices the sampler may pick.
///
/// `SkipFirst` never selects index 0 of a table with two or more entries.
/// Address data generated before this tool was configurable always behaved
/// this way, so it stays the default. A single-entry table has nothing else
/// to offer and samples its only entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPolicy {
    #[default]
    SkipFirst,
    Full,
}

impl IndexPolicy {
    /// Index range for a table of `len` entries. Errors on an empty table.
    pub fn index_range(self, table: &str, len: usize) -> Result<Range<usize>> {
        if len == 0 {
            bail!("{table} is empty");
        }
        match self {
            IndexPolicy::SkipFirst if len > 1 => Ok(1..len),
            IndexPolicy::SkipFirst => {
                tracing::warn!(table, "only one entry; index 0 will be sampled");
                Ok(0..len)
            }
            IndexPolicy::Full => Ok(0..len),
        }
    }
}

/// Builds one [`AddressRecord`] per call to [`Sampler::generate`].
///
/// Borrows both tables immutably; the only mutable state is the RNG.
pub struct Sampler<'a, R> {
    reference: &'a ReferenceData,
    streets: &'a StreetNames,
    rng: R,
    street_range: Range<usize>,
    zip_range: Range<usize>,
    number_buf: itoa::Buffer,
}

impl<'a, R: Rng> Sampler<'a, R> {
    pub fn new(
        reference: &'a ReferenceData,
        streets: &'a StreetNames,
        rng: R,
        policy: IndexPolicy,
    ) -> Result<Self> {
        let street_range = policy.index_range("street name table", streets.len())?;
        let zip_range = policy.index_range("reference zip table", reference.len())?;
        Ok(Self {
            reference,
            streets,
            rng,
            street_range,
            zip_range,
            number_buf: itoa::Buffer::new(),
        })
    }

    pub fn generate(&mut self) -> AddressRecord {
        let number = self.rng.gen_range(STREET_NUMBER_RANGE);
        let street_index = self.rng.gen_range(self.street_range.clone());
        let street = &self.streets.as_slice()[street_index];

        let number = self.number_buf.format(number);
        let mut primary_address = String::with_capacity(number.len() + 1 + street.len());
        primary_address.push_str(number);
        primary_address.push(' ');
        primary_address.push_str(street);

        let zip_index = self.rng.gen_range(self.zip_range.clone());
        let zip = self.reference.zips()[zip_index];
        let zip4 = self.rng.gen_range(ZIP4_RANGE);

        let Some(locale) = self.reference.lookup(zip) else {
            unreachable!("zip {zip} listed but missing from reference map");
        };

        AddressRecord {
            primary_address,
            city: locale.city.clone(),
            state: locale.state.clone(),
            zip: format_zip(zip),
            zip4: format_zip4(zip4),
        }
    }
}
