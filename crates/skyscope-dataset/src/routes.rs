//! # Route Pair Resolver
//!
//! Routes store airport codes, not countries. [`RouteCountries`] resolves
//! both endpoints through the [`AirportCountryIndex`] on every read;
//! unresolvable codes become [`UNKNOWN_COUNTRY`](skyscope_core::UNKNOWN_COUNTRY).

use std::sync::Arc;

use serde::Serialize;
use skyscope_core::{RouteRecord, Tier};
use skyscope_policy::AccessError;

use crate::filter::{CountryKey, DatasetFilter, RecordCountries};
use crate::index::AirportCountryIndex;

/// Route key: matches on either endpoint, groups by source.
#[derive(Debug, Clone)]
pub struct RouteCountries {
    index: Arc<AirportCountryIndex>,
}

impl RouteCountries {
    pub fn new(index: Arc<AirportCountryIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &AirportCountryIndex {
        &self.index
    }
}

impl CountryKey<RouteRecord> for RouteCountries {
    fn countries<'a>(&'a self, route: &'a RouteRecord) -> RecordCountries<'a> {
        RecordCountries::Pair {
            source: self.index.country_of(&route.source_airport),
            destination: self.index.country_of(&route.destination_airport),
        }
    }
}

/// A route with its endpoint countries attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoute<'a> {
    #[serde(flatten)]
    pub route: &'a RouteRecord,
    pub source_country: &'a str,
    pub destination_country: &'a str,
}

impl DatasetFilter<RouteRecord, RouteCountries> {
    /// Routes flying from `source` to `destination`.
    ///
    /// Both countries must be accessible to `tier`, and both must match
    /// exactly: the source country equals `source` **and** the destination
    /// country equals `destination`.
    pub fn between_countries(
        &self,
        tier: Tier,
        source: &str,
        destination: &str,
    ) -> Result<Vec<&RouteRecord>, AccessError> {
        let decision = self
            .policies()
            .check_pair_access(tier, source, destination)?;
        if !decision.allowed {
            tracing::info!(%tier, source, destination, "route pair access denied");
        }
        decision.into_result()?;
        Ok(self
            .records()
            .iter()
            .filter(|route| match self.countries_of(route) {
                RecordCountries::Pair {
                    source: s,
                    destination: d,
                } => s == source && d == destination,
                RecordCountries::Single(_) => false,
            })
            .collect())
    }

    /// Attach endpoint countries to one route.
    pub fn resolve<'a>(&'a self, route: &'a RouteRecord) -> ResolvedRoute<'a> {
        let (source_country, destination_country) = match self.countries_of(route) {
            RecordCountries::Pair {
                source,
                destination,
            } => (source, destination),
            RecordCountries::Single(country) => (country, country),
        };
        ResolvedRoute {
            route,
            source_country,
            destination_country,
        }
    }

    pub fn resolve_all<'a>(&'a self, routes: &[&'a RouteRecord]) -> Vec<ResolvedRoute<'a>> {
        routes.iter().map(|&route| self.resolve(route)).collect()
    }
}
