//! # Ed25519 Credential Keys
//!
//! The server holds one 32-byte seed. Credentials are signed with the key
//! pair derived from it and checked against the matching public key.
//!
//! Only [`CanonicalBytes`] can be signed or verified, so two encodings of
//! the same claims can never carry different signatures. A key pair has no
//! `Serialize` impl and its `Debug` output hides the seed.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use skyscope_core::CanonicalBytes;

use crate::error::CryptoError;
use crate::hex;

/// Fixed-width byte newtypes that travel as lowercase hex: in tokens, in
/// environment variables and in JSON.
macro_rules! hex_bytes {
    ($name:ident, $len:literal, $what:literal) => {
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            #[doc = concat!("Parse a ", $what, " from ", stringify!($len), " hex-encoded bytes.")]
            pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
                hex::decode_array::<$len>(s).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}..)", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                Self::from_hex(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_bytes!(Ed25519PublicKey, 32, "public key");
hex_bytes!(Ed25519Signature, 64, "signature");

/// The credential signing key.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// A key pair from a fresh random seed.
    pub fn generate() -> Self {
        Self::from_seed(&Self::generate_seed())
    }

    /// A fresh random seed, for provisioning `SKYSCOPE_SIGNING_KEY_HEX`.
    pub fn generate_seed() -> [u8; 32] {
        SigningKey::generate(&mut rand::rngs::OsRng).to_bytes()
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// A key pair from a 64-character hex seed.
    pub fn from_seed_hex(s: &str) -> Result<Self, CryptoError> {
        let seed = hex::decode_array::<32>(s)
            .map_err(|e| CryptoError::KeyError(format!("signing seed: {e}")))?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Check `signature` over `data` against `public_key`.
///
/// A public key that is not a valid curve point is a [`CryptoError::KeyError`];
/// a signature that does not match is [`CryptoError::VerificationFailed`].
pub fn verify(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let key = VerifyingKey::from_bytes(public_key.as_bytes())
        .map_err(|e| CryptoError::KeyError(format!("public key: {e}")))?;
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    key.verify(data.as_bytes(), &signature)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}
