//! # Credential Issuance
//!
//! Signs tier credentials for paid tiers. FREE is represented by the
//! absence of a credential, so issuing for FREE returns `None`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use skyscope_core::Tier;
use skyscope_crypto::Ed25519KeyPair;

use crate::error::CredentialError;
use crate::token::{self, TierClaims};
use crate::verifier::CredentialVerifier;

/// Default credential lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Longest accepted credential lifetime: ten years.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * DEFAULT_TOKEN_TTL_SECS;

/// A freshly issued credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCredential {
    /// Token text to present as `Authorization: Bearer <token>`.
    pub token: String,
    pub tier: Tier,
    pub expires_at: DateTime<Utc>,
}

/// Issues signed credentials with the server key.
///
/// Holds the key pair behind an `Arc` because it is not `Clone`.
#[derive(Debug, Clone)]
pub struct CredentialIssuer {
    key: Arc<Ed25519KeyPair>,
    ttl: Duration,
}

impl CredentialIssuer {
    /// Create an issuer signing with `key`, issuing tokens valid for `ttl_secs`.
    ///
    /// `ttl_secs` must lie in `1..=MAX_TOKEN_TTL_SECS`.
    pub fn new(key: Ed25519KeyPair, ttl_secs: i64) -> Result<Self, CredentialError> {
        let ttl = Some(ttl_secs)
            .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                CredentialError::InvalidLifetime(format!(
                    "{ttl_secs}s is outside 1..={MAX_TOKEN_TTL_SECS}s"
                ))
            })?;
        Ok(Self {
            key: Arc::new(key),
            ttl,
        })
    }

    /// Credential lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A verifier bound to this issuer's public key.
    pub fn verifier(&self) -> CredentialVerifier {
        CredentialVerifier::new(self.key.public_key())
    }

    /// Issue a credential for `tier`, valid from `now` for the configured TTL.
    ///
    /// Returns `Ok(None)` for [`Tier::Free`].
    pub fn issue(
        &self,
        tier: Tier,
        now: DateTime<Utc>,
    ) -> Result<Option<IssuedCredential>, CredentialError> {
        if !tier.is_credentialed() {
            return Ok(None);
        }

        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            CredentialError::InvalidLifetime(format!("{now} plus {}s overflows", self.ttl.num_seconds()))
        })?;
        let claims = TierClaims {
            tier: tier.as_str().to_string(),
            exp: expires_at.timestamp(),
        };
        let signature = self.key.sign(&claims.signing_input()?);

        tracing::debug!(tier = %tier, exp = claims.exp, "issued tier credential");

        Ok(Some(IssuedCredential {
            token: token::encode(&claims, &signature),
            tier,
            // Whole seconds, matching what the token carries.
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or(expires_at),
        }))
    }
}
