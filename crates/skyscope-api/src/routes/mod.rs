//! # Route Modules
//!
//! | Prefix | Module |
//! |--------|--------|
//! | `/`, `/health`, `/metrics` | [`system`] |
//! | `/api/auth/*` | [`tiers`] |
//! | `/api/airlines/*`, `/api/airports/*` | [`datasets`] |
//! | `/api/routes/*` | [`flights`] |
//!
//! Successful responses share one envelope:
//! `{success, tier, data|countries|statistics, metadata}`. The helpers
//! below build it for any [`DatasetFilter`], so airlines, airports and
//! routes differ only in how a record is presented.

pub mod datasets;
pub mod flights;
pub mod system;
pub mod tiers;

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use skyscope_core::Tier;
use skyscope_dataset::{CountryKey, DatasetFilter, DatasetKind, LabelledStatistics};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::error::AppError;

/// Success envelope carrying records.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<D, M> {
    pub success: bool,
    pub tier: Tier,
    pub data: D,
    pub metadata: M,
}

impl<D: Serialize, M: Serialize> DataEnvelope<D, M> {
    pub fn new(tier: Tier, data: D, metadata: M) -> Self {
        Self {
            success: true,
            tier,
            data,
            metadata,
        }
    }
}

/// Success envelope carrying a country list.
#[derive(Debug, Serialize, ToSchema)]
pub struct CountriesEnvelope {
    pub success: bool,
    #[schema(value_type = String, example = "free")]
    pub tier: Tier,
    pub countries: Vec<String>,
    pub metadata: CountMetadata,
}

/// Success envelope carrying dataset statistics.
#[derive(Debug, Serialize)]
pub struct StatisticsEnvelope<'a> {
    pub success: bool,
    pub tier: Tier,
    pub statistics: LabelledStatistics<'a>,
    pub metadata: DatasetMetadata,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountMetadata {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DatasetMetadata {
    pub dataset: DatasetKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedMetadata {
    pub dataset: DatasetKind,
    pub total_countries: usize,
    pub total_records: usize,
}

#[derive(Debug, Serialize)]
pub struct CountryMetadata<'a> {
    pub country: &'a str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairMetadata<'a> {
    pub source_country: &'a str,
    pub destination_country: &'a str,
    pub count: usize,
}

/// `byTier` grouping, each record rendered through `present`.
pub(crate) fn grouped_response<'a, R, K, P, F>(
    filter: &'a DatasetFilter<R, K>,
    kind: DatasetKind,
    tier: Tier,
    present: F,
) -> Result<Response, AppError>
where
    K: CountryKey<R>,
    F: Fn(&'a R) -> P,
    P: Serialize,
{
    let groups = filter.by_tier(tier)?;
    let total_countries = groups.len();
    let mut total_records = 0;
    let data: BTreeMap<&str, Vec<P>> = groups
        .into_iter()
        .map(|(country, records)| {
            total_records += records.len();
            (country, records.into_iter().map(&present).collect())
        })
        .collect();
    let metadata = GroupedMetadata {
        dataset: kind,
        total_countries,
        total_records,
    };
    Ok(Json(DataEnvelope::new(tier, data, metadata)).into_response())
}

/// `byCountry` lookup, each record rendered through `present`.
pub(crate) fn country_response<'a, R, K, P, F>(
    filter: &'a DatasetFilter<R, K>,
    tier: Tier,
    country: &str,
    present: F,
) -> Result<Response, AppError>
where
    K: CountryKey<R>,
    F: Fn(&'a R) -> P,
    P: Serialize,
{
    let data: Vec<P> = filter
        .by_country(tier, country)?
        .into_iter()
        .map(present)
        .collect();
    let metadata = CountryMetadata {
        country,
        count: data.len(),
    };
    Ok(Json(DataEnvelope::new(tier, data, metadata)).into_response())
}

/// `accessibleCountries` listing.
pub(crate) fn countries_response<R, K>(
    filter: &DatasetFilter<R, K>,
    tier: Tier,
) -> Result<Json<CountriesEnvelope>, AppError>
where
    K: CountryKey<R>,
{
    let countries = filter.accessible_countries(tier)?;
    Ok(Json(CountriesEnvelope {
        success: true,
        tier,
        metadata: CountMetadata {
            count: countries.len(),
        },
        countries,
    }))
}

/// `statistics`, keyed for the dataset kind.
pub(crate) fn statistics_response<R, K>(
    filter: &DatasetFilter<R, K>,
    kind: DatasetKind,
    tier: Tier,
) -> Result<Response, AppError>
where
    K: CountryKey<R>,
{
    let stats = filter.statistics(tier)?;
    Ok(Json(StatisticsEnvelope {
        success: true,
        tier,
        statistics: stats.labelled(kind),
        metadata: DatasetMetadata { dataset: kind },
    })
    .into_response())
}
