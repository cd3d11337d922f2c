//! # Tier Resolution Middleware
//!
//! Every `/api/*` request is served at exactly one [`Tier`]. The middleware
//! reads `Authorization: Bearer <token>`, verifies the credential, and
//! injects a [`CallerTier`] into request extensions.
//!
//! This is the only place where a failure falls through to FREE: a missing
//! header, another scheme, a malformed, forged, expired or unrecognized
//! credential all resolve to [`Tier::Free`]. Callers who need to know why a
//! credential was rejected use `POST /api/auth/verify`.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use skyscope_core::Tier;

use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// The tier the current request is served at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallerTier(pub Tier);

impl CallerTier {
    pub fn tier(&self) -> Tier {
        self.0
    }
}

/// Reads the tier injected by [`tier_middleware`].
///
/// A request that bypassed the middleware carries no credential, so it is
/// served as FREE.
impl<S: Send + Sync> FromRequestParts<S> for CallerTier {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CallerTier>()
            .copied()
            .unwrap_or_default())
    }
}

/// The bearer token from `headers`, if any. The scheme name matches
/// without regard to ASCII case.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

/// Resolve the caller's tier and store it in request extensions.
pub async fn tier_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers());
    let tier = state.verifier.resolve_tier(token, Utc::now());
    tracing::debug!(%tier, credential_presented = token.is_some(), "resolved caller tier");
    request.extensions_mut().insert(CallerTier(tier));
    next.run(request).await
}
