//! # API Error Types
//!
//! Maps domain errors to HTTP status codes and the JSON error body
//! `{success: false, error: {code, message}}`.
//!
//! | Source | Status |
//! |--------|--------|
//! | `AccessError::AccessDenied` | 403, message is the denial reason |
//! | `AccessError::InvalidTier` | 400 |
//! | `AccessError::UnknownTier` | 500, message hidden |
//! | `CredentialError` (explicit verification) | 401 |
//! | undecodable JSON body | 400 |
//! | business-rule violation in a body | 422 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use skyscope_credential::CredentialError;
use skyscope_policy::AccessError;
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "ACCESS_DENIED", "INVALID_TIER").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Extra context for credential failures. Never present on 500s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No such route or resource (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Caller supplied a string that is not a tier (400).
    #[error("invalid tier: {0}")]
    InvalidTier(String),

    /// Request body parsed but breaks a business rule (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// A credential presented for verification was rejected (401).
    #[error("{0}")]
    InvalidCredential(CredentialError),

    /// Tier policy denies the request (403). Carries the denial reason.
    #[error("{0}")]
    AccessDenied(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidTier(_) => (StatusCode::BAD_REQUEST, "INVALID_TIER"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::InvalidCredential(_) => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIAL"),
            Self::AccessDenied(_) => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let (message, details) = match &self {
            Self::Internal(cause) => {
                tracing::error!(%cause, "request failed with an internal error");
                ("An internal error occurred".to_string(), None)
            }
            Self::InvalidCredential(err) => (
                err.to_string(),
                Some(serde_json::json!({ "reason": err.code() })),
            ),
            other => (other.to_string(), None),
        };

        let error = ErrorDetail {
            code: code.into(),
            message,
            details,
        };
        (status, Json(ErrorBody { success: false, error })).into_response()
    }
}

/// Access decisions and policy lookups.
///
/// A tier missing from the policy table is a deployment defect, not a
/// caller error.
impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::AccessDenied(reason) => Self::AccessDenied(reason),
            AccessError::InvalidTier(value) => {
                Self::InvalidTier(format!("{value:?} is not one of free, pro, elite"))
            }
            unknown @ AccessError::UnknownTier(_) => Self::Internal(unknown.to_string()),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Encoding(msg) | CredentialError::InvalidLifetime(msg) => {
                Self::Internal(msg)
            }
            other => Self::InvalidCredential(other),
        }
    }
}
