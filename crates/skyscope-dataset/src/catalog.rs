//! # Dataset Catalog
//!
//! The three filters built from one set of loaded records and one policy
//! table.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skyscope_core::{AirlineRecord, AirportRecord, RouteRecord};
use skyscope_policy::PolicyTable;

use crate::error::DatasetError;
use crate::filter::{DatasetFilter, DirectCountry};
use crate::index::AirportCountryIndex;
use crate::loader::Datasets;
use crate::routes::RouteCountries;

pub type AirlineFilter = DatasetFilter<AirlineRecord, DirectCountry>;
pub type AirportFilter = DatasetFilter<AirportRecord, DirectCountry>;
pub type RouteFilter = DatasetFilter<RouteRecord, RouteCountries>;

/// The record kinds served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Airlines,
    Airports,
    Routes,
}

impl DatasetKind {
    pub fn all() -> &'static [DatasetKind] {
        &[Self::Airlines, Self::Airports, Self::Routes]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airlines => "airlines",
            Self::Airports => "airports",
            Self::Routes => "routes",
        }
    }

    /// Statistics key for the record total.
    pub fn total_key(&self) -> &'static str {
        match self {
            Self::Airlines => "totalAirlines",
            Self::Airports => "totalAirports",
            Self::Routes => "totalRoutes",
        }
    }

    /// OpenFlights file name for this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Airlines => "airlines.dat",
            Self::Airports => "airports.dat",
            Self::Routes => "routes.dat",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "airlines" => Ok(Self::Airlines),
            "airports" => Ok(Self::Airports),
            "routes" => Ok(Self::Routes),
            _ => Err(DatasetError::UnknownKind(s.to_string())),
        }
    }
}

/// Tier-scoped access to airlines, airports and routes.
#[derive(Debug)]
pub struct Catalog {
    pub airlines: AirlineFilter,
    pub airports: AirportFilter,
    pub routes: RouteFilter,
    policies: Arc<PolicyTable>,
}

impl Catalog {
    /// Build the filters. Airports feed the route country index before
    /// being moved into their own filter.
    pub fn new(datasets: Datasets, policies: Arc<PolicyTable>) -> Self {
        let Datasets {
            airlines,
            airports,
            routes,
        } = datasets;
        let index = Arc::new(AirportCountryIndex::from_airports(&airports));
        tracing::info!(
            airlines = airlines.len(),
            airports = airports.len(),
            routes = routes.len(),
            indexed_codes = index.len(),
            "dataset catalog built"
        );
        Self {
            airlines: DatasetFilter::new(airlines, DirectCountry, Arc::clone(&policies)),
            airports: DatasetFilter::new(airports, DirectCountry, Arc::clone(&policies)),
            routes: DatasetFilter::new(routes, RouteCountries::new(index), Arc::clone(&policies)),
            policies,
        }
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Loaded record count per kind.
    pub fn len_of(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Airlines => self.airlines.records().len(),
            DatasetKind::Airports => self.airports.records().len(),
            DatasetKind::Routes => self.routes.records().len(),
        }
    }
}
