//! # Aviation Records
//!
//! Flat record types loaded once at startup and shared read-only across
//! every request. Records are never mutated after load.
//!
//! Airlines and airports carry their country directly ([`HasCountry`]).
//! Routes only carry airport codes; their source and destination countries
//! are derived on read through an airport-code index owned by the dataset
//! layer.

use serde::{Deserialize, Serialize};

/// A record that names its country directly.
pub trait HasCountry {
    /// The record's country name, exactly as loaded.
    fn country(&self) -> &str;
}

/// An airline operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineRecord {
    /// Source dataset identifier.
    pub id: u32,
    pub name: String,
    pub alias: Option<String>,
    /// Two-letter IATA designator.
    pub iata: Option<String>,
    /// Three-letter ICAO designator.
    pub icao: Option<String>,
    pub callsign: Option<String>,
    /// Country of registration.
    pub country: String,
    pub active: bool,
}

impl HasCountry for AirlineRecord {
    fn country(&self) -> &str {
        &self.country
    }
}

/// An airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRecord {
    /// Source dataset identifier.
    pub id: u32,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Three-letter IATA code.
    pub iata: Option<String>,
    /// Four-letter ICAO code.
    pub icao: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in feet.
    pub altitude: i32,
    /// IANA time zone name.
    pub timezone: Option<String>,
}

impl HasCountry for AirportRecord {
    fn country(&self) -> &str {
        &self.country
    }
}

/// A scheduled route between two airports, flown by one airline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    /// Airline IATA or ICAO designator.
    pub airline: String,
    pub airline_id: Option<u32>,
    /// Source airport IATA or ICAO code.
    pub source_airport: String,
    pub source_airport_id: Option<u32>,
    /// Destination airport IATA or ICAO code.
    pub destination_airport: String,
    pub destination_airport_id: Option<u32>,
    pub codeshare: bool,
    pub stops: u32,
    /// Aircraft type codes.
    pub equipment: Vec<String>,
}
