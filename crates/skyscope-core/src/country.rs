//! # Country Classification
//!
//! Country names are plain strings compared exactly. A record whose
//! country cannot be determined carries [`UNKNOWN_COUNTRY`]; such records
//! never satisfy an allow-list and never appear as a grouping key.

/// Sentinel country for records whose airport or country code did not resolve.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Whether `country` names a real country usable as a grouping key.
///
/// Empty strings and [`UNKNOWN_COUNTRY`] are unresolved.
pub fn is_resolved_country(country: &str) -> bool {
    !country.is_empty() && country != UNKNOWN_COUNTRY
}
