//! # Credential Verification and Tier Resolution

use chrono::{DateTime, Utc};
use serde::Serialize;
use skyscope_core::Tier;
use skyscope_crypto::Ed25519PublicKey;

use crate::error::CredentialError;
use crate::token;

/// A credential that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCredential {
    pub tier: Tier,
    pub expires_at: DateTime<Utc>,
}

/// Verifies credentials against the server's public key.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    public_key: Ed25519PublicKey,
}

impl CredentialVerifier {
    /// Create a verifier for credentials signed by `public_key`.
    pub fn new(public_key: Ed25519PublicKey) -> Self {
        Self { public_key }
    }

    /// The public key credentials are checked against.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    /// Verify `token` at instant `now`, reporting exactly why it failed.
    ///
    /// Checks run in order: shape, signature, tier claim present, tier
    /// claim recognized, expiry. A token whose expiry equals `now` is expired.
    pub fn verify(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedCredential, CredentialError> {
        let (claims, signature) = token::decode(token)?;

        skyscope_crypto::verify(&claims.signing_input()?, &signature, &self.public_key)
            .map_err(|_| CredentialError::InvalidSignature)?;

        if claims.tier.is_empty() {
            return Err(CredentialError::MissingTier);
        }
        let tier: Tier = claims
            .tier
            .parse()
            .map_err(|_| CredentialError::UnrecognizedTier(claims.tier.clone()))?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            CredentialError::Malformed(format!("expiry {} is out of range", claims.exp))
        })?;
        if expires_at <= now {
            return Err(CredentialError::Expired {
                expired_at: expires_at,
            });
        }

        Ok(VerifiedCredential { tier, expires_at })
    }

    /// Resolve the caller's tier from an optional credential.
    ///
    /// Absent, malformed, forged and expired credentials all resolve to
    /// [`Tier::Free`]. This is the only place that falls back to FREE.
    pub fn resolve_tier(&self, token: Option<&str>, now: DateTime<Utc>) -> Tier {
        let Some(token) = token else {
            return Tier::Free;
        };
        match self.verify(token, now) {
            Ok(verified) => verified.tier,
            Err(err) => {
                tracing::debug!(reason = %err, code = err.code(), "credential rejected, using free tier");
                Tier::Free
            }
        }
    }
}
