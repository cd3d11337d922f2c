//! # Credential Errors
//!
//! The invalid-credential family. Data paths recover every variant into
//! the FREE tier; verification endpoints report the variant verbatim.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a presented credential was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The token does not have the `{tier}:{expires_at}:{signature}` shape.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The signature does not match the claims under the server key.
    #[error("credential signature is invalid")]
    InvalidSignature,

    /// The token is signed but carries no tier claim.
    #[error("credential has no tier claim")]
    MissingTier,

    /// The tier claim is not one of the known tiers.
    #[error("credential tier claim {0:?} is not a recognized tier")]
    UnrecognizedTier(String),

    /// The token expired at the given instant.
    #[error("credential expired at {expired_at}")]
    Expired {
        /// Expiry instant carried by the token.
        expired_at: DateTime<Utc>,
    },

    /// Claims could not be canonicalized for signing.
    #[error("credential claims could not be encoded: {0}")]
    Encoding(String),

    /// The issuer's lifetime cannot produce a representable expiry.
    #[error("credential lifetime out of range: {0}")]
    InvalidLifetime(String),
}

impl CredentialError {
    /// Machine-readable reason code for diagnostic responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "MALFORMED",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MissingTier => "MISSING_TIER",
            Self::UnrecognizedTier(_) => "UNRECOGNIZED_TIER",
            Self::Expired { .. } => "EXPIRED",
            Self::Encoding(_) => "ENCODING",
            Self::InvalidLifetime(_) => "INVALID_LIFETIME",
        }
    }
}
