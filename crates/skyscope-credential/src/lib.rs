//! # skyscope-credential: Tier Credentials
//!
//! A credential is an opaque, signed, expiring token binding exactly one
//! [`Tier`](skyscope_core::Tier). The FREE tier has no credential: issuing
//! for FREE yields nothing, and presenting nothing resolves to FREE.
//!
//! - **Issuance** ([`CredentialIssuer`]): signs `{tier, exp}` claims with the
//!   server's Ed25519 key.
//! - **Verification** ([`CredentialVerifier::verify`]): reports exactly why a
//!   token failed (malformed, bad signature, missing or unrecognized tier,
//!   expired). Used by diagnostic endpoints.
//! - **Resolution** ([`CredentialVerifier::resolve_tier`]): the single place
//!   where any failure falls back to FREE. Used on every data access path.
//!
//! Credentials are never revoked server-side; expiry is the only
//! invalidation path. All operations take `now` explicitly and are pure.

pub mod error;
pub mod issuer;
pub mod token;
pub mod verifier;

pub use error::CredentialError;
pub use issuer::{
    CredentialIssuer, IssuedCredential, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
};
pub use token::{TierClaims, TOKEN_SEPARATOR};
pub use verifier::{CredentialVerifier, VerifiedCredential};
