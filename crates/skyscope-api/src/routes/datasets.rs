//! # Airlines and Airports
//!
//! Both kinds carry their own country field, so their records are returned
//! as stored.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use skyscope_dataset::DatasetKind;

use super::{
    countries_response, country_response, grouped_response, statistics_response,
    CountriesEnvelope,
};
use crate::auth::CallerTier;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/airlines", get(airlines_by_tier))
        .route("/api/airlines/countries", get(airline_countries))
        .route("/api/airlines/statistics", get(airline_statistics))
        .route("/api/airlines/country/{country}", get(airlines_by_country))
        .route("/api/airports", get(airports_by_tier))
        .route("/api/airports/countries", get(airport_countries))
        .route("/api/airports/statistics", get(airport_statistics))
        .route("/api/airports/country/{country}", get(airports_by_country))
}

// -- Airlines -----------------------------------------------------------------

/// GET /api/airlines: Airlines visible to the caller, grouped by country.
#[utoipa::path(
    get,
    path = "/api/airlines",
    responses(
        (status = 200, description = "Airlines grouped by country"),
        (status = 500, description = "Tier has no configured policy", body = crate::error::ErrorBody),
    ),
    tag = "airlines"
)]
pub(crate) async fn airlines_by_tier(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    grouped_response(&state.catalog.airlines, DatasetKind::Airlines, tier, |a| a)
}

/// GET /api/airlines/countries: Countries the caller may query.
#[utoipa::path(
    get,
    path = "/api/airlines/countries",
    responses(
        (status = 200, description = "Accessible countries", body = CountriesEnvelope),
    ),
    tag = "airlines"
)]
pub(crate) async fn airline_countries(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Json<CountriesEnvelope>, AppError> {
    countries_response(&state.catalog.airlines, tier)
}

/// GET /api/airlines/statistics
#[utoipa::path(
    get,
    path = "/api/airlines/statistics",
    responses(
        (status = 200, description = "totalAirlines, totalCountries, countriesWithData"),
    ),
    tag = "airlines"
)]
pub(crate) async fn airline_statistics(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    statistics_response(&state.catalog.airlines, DatasetKind::Airlines, tier)
}

/// GET /api/airlines/country/{country}
#[utoipa::path(
    get,
    path = "/api/airlines/country/{country}",
    params(("country" = String, Path, description = "Exact, case-sensitive country name")),
    responses(
        (status = 200, description = "Airlines registered in the country"),
        (status = 403, description = "Country not accessible at the caller's tier", body = crate::error::ErrorBody),
    ),
    tag = "airlines"
)]
pub(crate) async fn airlines_by_country(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
    Path(country): Path<String>,
) -> Result<Response, AppError> {
    country_response(&state.catalog.airlines, tier, &country, |a| a)
}

// -- Airports -----------------------------------------------------------------

/// GET /api/airports: Airports visible to the caller, grouped by country.
#[utoipa::path(
    get,
    path = "/api/airports",
    responses(
        (status = 200, description = "Airports grouped by country"),
        (status = 500, description = "Tier has no configured policy", body = crate::error::ErrorBody),
    ),
    tag = "airports"
)]
pub(crate) async fn airports_by_tier(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    grouped_response(&state.catalog.airports, DatasetKind::Airports, tier, |a| a)
}

#[utoipa::path(
    get,
    path = "/api/airports/countries",
    responses(
        (status = 200, description = "Accessible countries", body = CountriesEnvelope),
    ),
    tag = "airports"
)]
pub(crate) async fn airport_countries(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Json<CountriesEnvelope>, AppError> {
    countries_response(&state.catalog.airports, tier)
}

#[utoipa::path(
    get,
    path = "/api/airports/statistics",
    responses(
        (status = 200, description = "totalAirports, totalCountries, countriesWithData"),
    ),
    tag = "airports"
)]
pub(crate) async fn airport_statistics(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    statistics_response(&state.catalog.airports, DatasetKind::Airports, tier)
}

#[utoipa::path(
    get,
    path = "/api/airports/country/{country}",
    params(("country" = String, Path, description = "Exact, case-sensitive country name")),
    responses(
        (status = 200, description = "Airports located in the country"),
        (status = 403, description = "Country not accessible at the caller's tier", body = crate::error::ErrorBody),
    ),
    tag = "airports"
)]
pub(crate) async fn airports_by_country(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
    Path(country): Path<String>,
) -> Result<Response, AppError> {
    country_response(&state.catalog.airports, tier, &country, |a| a)
}
