use serde::Serialize;

/// One synthetic address, serialized as a headerless CSV row in field order.
///
/// `zip` is always five digits and `zip4` four, both zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    pub primary_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub zip4: String,
}

/// Zero-pad a zip code to five digits.
pub fn format_zip(zip: u32) -> String {
    format!("{zip:05}")
}

/// Zero-pad a zip+4 extension to four digits.
pub fn format_zip4(zip4: u32) -> String {
    format!("{zip4:04}")
}
