//! # Token Wire Format
//!
//! ```text
//! {tier}:{expires_at}:{signature_hex}
//! ```
//!
//! `tier` is the lowercase tier claim, `expires_at` a Unix timestamp in
//! seconds, and `signature_hex` 128 lowercase hex characters. The signature
//! covers the canonical JSON of `{"exp": expires_at, "tier": tier}`.

use serde::{Deserialize, Serialize};
use skyscope_core::CanonicalBytes;
use skyscope_crypto::Ed25519Signature;

use crate::error::CredentialError;

/// Separator between token segments.
pub const TOKEN_SEPARATOR: char = ':';

/// The signed claims of a credential, before the tier claim is interpreted.
///
/// `tier` holds the raw claim so that a validly signed but unknown claim
/// can be reported as such instead of as a signature failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierClaims {
    /// Raw tier claim.
    pub tier: String,
    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,
}

impl TierClaims {
    /// The exact bytes covered by the signature.
    pub fn signing_input(&self) -> Result<CanonicalBytes, CredentialError> {
        CanonicalBytes::new(self).map_err(|e| CredentialError::Encoding(e.to_string()))
    }
}

/// Render claims and signature as token text.
pub(crate) fn encode(claims: &TierClaims, signature: &Ed25519Signature) -> String {
    format!(
        "{tier}{sep}{exp}{sep}{sig}",
        tier = claims.tier,
        exp = claims.exp,
        sig = signature.to_hex(),
        sep = TOKEN_SEPARATOR,
    )
}

/// Split token text into claims and signature. Checks shape only.
pub(crate) fn decode(token: &str) -> Result<(TierClaims, Ed25519Signature), CredentialError> {
    let parts: Vec<&str> = token.trim().split(TOKEN_SEPARATOR).collect();
    let [tier, exp, signature] = parts.as_slice() else {
        return Err(CredentialError::Malformed(format!(
            "expected 3 segments separated by '{TOKEN_SEPARATOR}', got {}",
            parts.len()
        )));
    };

    let exp = exp
        .parse::<i64>()
        .map_err(|e| CredentialError::Malformed(format!("invalid expiry segment: {e}")))?;
    let signature = Ed25519Signature::from_hex(signature)
        .map_err(|e| CredentialError::Malformed(format!("invalid signature segment: {e}")))?;

    Ok((
        TierClaims {
            tier: (*tier).to_string(),
            exp,
        },
        signature,
    ))
}
