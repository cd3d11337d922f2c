//! # OpenAPI Document
//!
//! Assembles the utoipa-annotated handlers into one OpenAPI 3.1 document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skyscope Aviation Data API",
        description = "Airline, airport and route reference data scoped by subscription tier. Present `Authorization: Bearer <token>` to be served above the free tier.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // System
        crate::routes::system::welcome,
        crate::routes::system::health,
        crate::routes::system::render_metrics,
        // Auth
        crate::routes::tiers::issue_token,
        crate::routes::tiers::verify_token,
        crate::routes::tiers::list_tiers,
        crate::routes::tiers::get_tier,
        // Airlines
        crate::routes::datasets::airlines_by_tier,
        crate::routes::datasets::airline_countries,
        crate::routes::datasets::airline_statistics,
        crate::routes::datasets::airlines_by_country,
        // Airports
        crate::routes::datasets::airports_by_tier,
        crate::routes::datasets::airport_countries,
        crate::routes::datasets::airport_statistics,
        crate::routes::datasets::airports_by_country,
        // Routes
        crate::routes::flights::routes_by_tier,
        crate::routes::flights::route_countries,
        crate::routes::flights::route_statistics,
        crate::routes::flights::routes_by_country,
        crate::routes::flights::routes_between,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::CountriesEnvelope,
        crate::routes::CountMetadata,
        crate::routes::system::WelcomeResponse,
        crate::routes::system::HealthResponse,
        crate::routes::system::DatasetCounts,
        crate::routes::tiers::TokenRequest,
        crate::routes::tiers::TokenResponse,
        crate::routes::tiers::VerifyRequest,
        crate::routes::tiers::VerifyResponse,
        crate::routes::tiers::TierPolicyView,
        crate::routes::tiers::TiersResponse,
        crate::routes::tiers::TierResponse,
    )),
    tags(
        (name = "system", description = "Service information"),
        (name = "auth", description = "Tier credentials and policies"),
        (name = "airlines", description = "Airlines by registration country"),
        (name = "airports", description = "Airports by location country"),
        (name = "routes", description = "Flight routes, authorized on both endpoint countries"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
