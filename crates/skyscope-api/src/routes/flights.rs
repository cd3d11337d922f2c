//! # Flight Routes
//!
//! Route records are returned with `sourceCountry` and
//! `destinationCountry` resolved on read from the airport index.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use skyscope_dataset::DatasetKind;

use super::{
    countries_response, country_response, grouped_response, statistics_response,
    CountriesEnvelope, DataEnvelope, PairMetadata,
};
use crate::auth::CallerTier;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/routes", get(routes_by_tier))
        .route("/api/routes/countries", get(route_countries))
        .route("/api/routes/statistics", get(route_statistics))
        .route("/api/routes/country/{country}", get(routes_by_country))
        .route(
            "/api/routes/between/{source}/{destination}",
            get(routes_between),
        )
}

/// GET /api/routes: Routes visible to the caller, grouped by source country.
///
/// A route is visible when either endpoint is accessible, but it is
/// grouped under its source country only.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses(
        (status = 200, description = "Routes grouped by source country"),
        (status = 500, description = "Tier has no configured policy", body = crate::error::ErrorBody),
    ),
    tag = "routes"
)]
pub(crate) async fn routes_by_tier(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    let routes = &state.catalog.routes;
    grouped_response(routes, DatasetKind::Routes, tier, |r| routes.resolve(r))
}

#[utoipa::path(
    get,
    path = "/api/routes/countries",
    responses(
        (status = 200, description = "Accessible countries", body = CountriesEnvelope),
    ),
    tag = "routes"
)]
pub(crate) async fn route_countries(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Json<CountriesEnvelope>, AppError> {
    countries_response(&state.catalog.routes, tier)
}

#[utoipa::path(
    get,
    path = "/api/routes/statistics",
    responses(
        (status = 200, description = "totalRoutes, totalCountries, countriesWithData"),
    ),
    tag = "routes"
)]
pub(crate) async fn route_statistics(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
) -> Result<Response, AppError> {
    statistics_response(&state.catalog.routes, DatasetKind::Routes, tier)
}

/// GET /api/routes/country/{country}: Routes touching the country at either end.
#[utoipa::path(
    get,
    path = "/api/routes/country/{country}",
    params(("country" = String, Path, description = "Exact, case-sensitive country name")),
    responses(
        (status = 200, description = "Routes departing from or arriving in the country"),
        (status = 403, description = "Country not accessible at the caller's tier", body = crate::error::ErrorBody),
    ),
    tag = "routes"
)]
pub(crate) async fn routes_by_country(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
    Path(country): Path<String>,
) -> Result<Response, AppError> {
    let routes = &state.catalog.routes;
    country_response(routes, tier, &country, |r| routes.resolve(r))
}

/// GET /api/routes/between/{source}/{destination}: Routes from one country to another.
#[utoipa::path(
    get,
    path = "/api/routes/between/{source}/{destination}",
    params(
        ("source" = String, Path, description = "Source country, exact match"),
        ("destination" = String, Path, description = "Destination country, exact match"),
    ),
    responses(
        (status = 200, description = "Routes whose source and destination both match"),
        (status = 403, description = "Either country not accessible at the caller's tier", body = crate::error::ErrorBody),
    ),
    tag = "routes"
)]
pub(crate) async fn routes_between(
    State(state): State<AppState>,
    CallerTier(tier): CallerTier,
    Path((source, destination)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let routes = &state.catalog.routes;
    let found = routes.between_countries(tier, &source, &destination)?;
    let data = routes.resolve_all(&found);
    let metadata = PairMetadata {
        source_country: &source,
        destination_country: &destination,
        count: data.len(),
    };
    Ok(Json(DataEnvelope::new(tier, data, metadata)).into_response())
}
