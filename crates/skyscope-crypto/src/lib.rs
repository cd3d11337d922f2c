//! # skyscope-crypto: Cryptographic Primitives
//!
//! Ed25519 signing and verification for tier credentials.
//!
//! - Signing input is always [`CanonicalBytes`](skyscope_core::CanonicalBytes).
//! - Private keys are never serialized or logged.
//! - Public keys and signatures serialize as lowercase hex.

pub mod ed25519;
pub mod error;
pub mod hex;

pub use ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
