//! # Request Metrics
//!
//! Counters recorded through the `metrics` facade. The binary installs a
//! Prometheus recorder and serves it at `/metrics`; without a recorder
//! these calls are no-ops.
//!
//! - `skyscope_http_requests_total{tier, status}`
//! - `skyscope_access_denied_total{tier}`

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::CallerTier;

pub const HTTP_REQUESTS_TOTAL: &str = "skyscope_http_requests_total";
pub const ACCESS_DENIED_TOTAL: &str = "skyscope_access_denied_total";

/// Count every response by caller tier and status, and every 403 by tier.
///
/// Must run inside [`crate::auth::tier_middleware`] so the tier is known.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let tier = request
        .extensions()
        .get::<CallerTier>()
        .copied()
        .unwrap_or_default()
        .tier();

    let response = next.run(request).await;
    let status = response.status();

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "tier" => tier.as_str(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    if status == StatusCode::FORBIDDEN {
        metrics::counter!(ACCESS_DENIED_TOTAL, "tier" => tier.as_str()).increment(1);
    }

    response
}
