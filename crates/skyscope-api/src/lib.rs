//! # skyscope-api: Tier-Scoped Aviation Data over HTTP
//!
//! Serves airline, airport and route reference data. Every `/api/*`
//! request is served at the tier carried by its bearer credential, and
//! that tier's policy decides which countries' records are visible.
//!
//! ## API Surface
//!
//! | Prefix | Module |
//! |--------|--------|
//! | `/`, `/health`, `/metrics` | [`routes::system`] |
//! | `/openapi.json` | [`openapi`] |
//! | `/api/auth/*` | [`routes::tiers`] |
//! | `/api/airlines/*`, `/api/airports/*` | [`routes::datasets`] |
//! | `/api/routes/*` | [`routes::flights`] |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! Cors → Trace → TierResolution → Metrics → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router.
///
/// Service endpoints sit outside tier resolution; they carry no
/// tier-scoped data.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::tiers::router())
        .merge(routes::datasets::router())
        .merge(routes::flights::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(from_fn_with_state(state.clone(), auth::tier_middleware));

    Router::new()
        .merge(routes::system::router())
        .merge(openapi::router())
        .merge(api)
        .fallback(not_found)
        .layer(middleware::trace::layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("no such endpoint".to_string())
}
