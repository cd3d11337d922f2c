//! # Tier Credentials and Policies
//!
//! - `POST /api/auth/token`: issue a credential for a tier. FREE gets no
//!   credential.
//! - `POST /api/auth/verify`: check a credential and report precisely why
//!   it failed. Unlike the data endpoints, failures here are not recovered
//!   to FREE.
//! - `GET /api/auth/tiers[/{tier}]`: the configured tier policies.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyscope_core::Tier;
use skyscope_policy::{AccessError, TierPolicy};
use utoipa::ToSchema;

use crate::auth::CallerTier;
use crate::error::AppError;
use crate::extractors::{CheckedJson, RequiredFields};
use crate::state::AppState;

/// Request a credential.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// `free`, `pro` or `elite`, case-insensitive.
    #[schema(example = "pro")]
    pub tier: String,
}

impl RequiredFields for TokenRequest {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("tier", self.tier.as_str())]
    }
}

/// Issued credential. `token` is null for the free tier.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    #[schema(value_type = String, example = "pro")]
    pub tier: Tier,
    pub token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub message: String,
}

/// Credential to check.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub token: String,
}

impl RequiredFields for VerifyRequest {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("token", self.token.as_str())]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub valid: bool,
    #[schema(value_type = String, example = "elite")]
    pub tier: Tier,
    pub expires_at: DateTime<Utc>,
}

/// One tier's policy. `countries` is absent when unrestricted.
#[derive(Debug, Serialize, ToSchema)]
pub struct TierPolicyView {
    #[schema(value_type = String, example = "free")]
    pub tier: Tier,
    pub unrestricted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
}

impl TierPolicyView {
    fn new(tier: Tier, policy: &TierPolicy) -> Self {
        Self {
            tier,
            unrestricted: policy.is_unrestricted(),
            countries: policy.listed_countries().map(<[String]>::to_vec),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TiersResponse {
    pub success: bool,
    /// The caller's tier.
    #[schema(value_type = String, example = "free")]
    pub tier: Tier,
    pub data: Vec<TierPolicyView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierResponse {
    pub success: bool,
    #[schema(value_type = String, example = "free")]
    pub tier: Tier,
    pub data: TierPolicyView,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/token", post(issue_token))
        .route("/api/auth/verify", post(verify_token))
        .route("/api/auth/tiers", get(list_tiers))
        .route("/api/auth/tiers/{tier}", get(get_tier))
}

/// POST /api/auth/token: Issue a tier credential.
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Credential issued (null for free)", body = TokenResponse),
        (status = 400, description = "Not a tier, or body not JSON", body = crate::error::ErrorBody),
        (status = 422, description = "Empty tier", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
pub(crate) async fn issue_token(
    State(state): State<AppState>,
    CheckedJson(req): CheckedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tier: Tier = req.tier.trim().parse().map_err(AccessError::from)?;
    let issued = state.issuer.issue(tier, Utc::now())?;
    let response = match issued {
        Some(credential) => {
            tracing::info!(%tier, expires_at = %credential.expires_at, "issued tier credential");
            TokenResponse {
                success: true,
                tier,
                token: Some(credential.token),
                expires_at: Some(credential.expires_at),
                message: "Present the token as `Authorization: Bearer <token>`".to_string(),
            }
        }
        None => TokenResponse {
            success: true,
            tier,
            token: None,
            expires_at: None,
            message: "The free tier needs no credential".to_string(),
        },
    };
    Ok(Json(response))
}

/// POST /api/auth/verify: Verify a credential.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Credential valid", body = VerifyResponse),
        (status = 401, description = "Credential rejected; details.reason names why", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
pub(crate) async fn verify_token(
    State(state): State<AppState>,
    CheckedJson(req): CheckedJson<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let verified = state
        .verifier
        .verify(req.token.trim(), Utc::now())
        .inspect_err(|err| tracing::warn!(reason = err.code(), "credential verification failed"))?;
    Ok(Json(VerifyResponse {
        success: true,
        valid: true,
        tier: verified.tier,
        expires_at: verified.expires_at,
    }))
}

/// GET /api/auth/tiers: Every tier's policy.
#[utoipa::path(
    get,
    path = "/api/auth/tiers",
    responses(
        (status = 200, description = "Configured tier policies", body = TiersResponse),
    ),
    tag = "auth"
)]
pub(crate) async fn list_tiers(
    State(state): State<AppState>,
    CallerTier(caller): CallerTier,
) -> Json<TiersResponse> {
    let data = state
        .catalog
        .policies()
        .iter()
        .map(|(tier, policy)| TierPolicyView::new(tier, policy))
        .collect();
    Json(TiersResponse {
        success: true,
        tier: caller,
        data,
    })
}

/// GET /api/auth/tiers/{tier}: One tier's policy.
#[utoipa::path(
    get,
    path = "/api/auth/tiers/{tier}",
    params(("tier" = String, Path, description = "free, pro or elite")),
    responses(
        (status = 200, description = "The tier's policy", body = TierResponse),
        (status = 400, description = "Not a tier", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
pub(crate) async fn get_tier(
    State(state): State<AppState>,
    CallerTier(caller): CallerTier,
    Path(tier): Path<String>,
) -> Result<Json<TierResponse>, AppError> {
    let tier: Tier = tier.parse().map_err(AccessError::from)?;
    let policy = state.catalog.policies().policy_for(tier)?;
    Ok(Json(TierResponse {
        success: true,
        tier: caller,
        data: TierPolicyView::new(tier, policy),
    }))
}
