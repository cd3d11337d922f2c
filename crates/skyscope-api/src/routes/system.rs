//! # Service Endpoints
//!
//! Welcome document, health with dataset sizes, and Prometheus exposition.
//! None of these go through tier resolution.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use skyscope_dataset::DatasetKind;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

const ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /openapi.json",
    "POST /api/auth/token",
    "POST /api/auth/verify",
    "GET /api/auth/tiers",
    "GET /api/auth/tiers/{tier}",
    "GET /api/airlines",
    "GET /api/airlines/countries",
    "GET /api/airlines/statistics",
    "GET /api/airlines/country/{country}",
    "GET /api/airports",
    "GET /api/airports/countries",
    "GET /api/airports/statistics",
    "GET /api/airports/country/{country}",
    "GET /api/routes",
    "GET /api/routes/countries",
    "GET /api/routes/statistics",
    "GET /api/routes/country/{country}",
    "GET /api/routes/between/{source}/{destination}",
];

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub authentication: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub datasets: DatasetCounts,
}

/// Loaded record counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetCounts {
    pub airlines: usize,
    pub airports: usize,
    pub routes: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
}

/// GET /: Service name, version and endpoint list.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome document", body = WelcomeResponse)),
    tag = "system"
)]
pub(crate) async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        name: "Skyscope Aviation Data API",
        version: env!("CARGO_PKG_VERSION"),
        authentication: "Authorization: Bearer <token> from POST /api/auth/token; no credential means the free tier",
        endpoints: ENDPOINTS.to_vec(),
    })
}

/// GET /health: Liveness plus loaded dataset sizes.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "system"
)]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = &state.catalog;
    Json(HealthResponse {
        status: "ok",
        datasets: DatasetCounts {
            airlines: catalog.len_of(DatasetKind::Airlines),
            airports: catalog.len_of(DatasetKind::Airports),
            routes: catalog.len_of(DatasetKind::Routes),
        },
    })
}

/// GET /metrics: Prometheus text exposition.
///
/// 404 when the process runs without a recorder.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus text format", body = String, content_type = "text/plain"),
        (status = 404, description = "No recorder installed", body = crate::error::ErrorBody),
    ),
    tag = "system"
)]
pub(crate) async fn render_metrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::NotFound("metrics recorder not installed".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
