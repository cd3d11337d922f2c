//! # Airport Country Index
//!
//! Routes reference airports by code only. This index resolves a code to
//! the airport's country. IATA codes are indexed first; ICAO codes are a
//! secondary key and never displace an IATA entry.

use std::collections::HashMap;

use skyscope_core::{AirportRecord, UNKNOWN_COUNTRY};

/// Read-only mapping from airport code to country name.
#[derive(Debug, Clone, Default)]
pub struct AirportCountryIndex {
    by_code: HashMap<String, String>,
}

impl AirportCountryIndex {
    /// Build the index from loaded airports.
    pub fn from_airports(airports: &[AirportRecord]) -> Self {
        let mut by_code = HashMap::with_capacity(airports.len() * 2);
        for airport in airports {
            if let Some(iata) = usable_code(airport.iata.as_deref()) {
                by_code.insert(iata.to_string(), airport.country.clone());
            }
        }
        for airport in airports {
            if let Some(icao) = usable_code(airport.icao.as_deref()) {
                by_code
                    .entry(icao.to_string())
                    .or_insert_with(|| airport.country.clone());
            }
        }
        Self { by_code }
    }

    /// Country of the airport with this code, or [`UNKNOWN_COUNTRY`].
    pub fn country_of(&self, code: &str) -> &str {
        self.by_code
            .get(code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_COUNTRY)
    }

    /// Number of indexed codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

fn usable_code(code: Option<&str>) -> Option<&str> {
    code.map(str::trim).filter(|c| !c.is_empty())
}
