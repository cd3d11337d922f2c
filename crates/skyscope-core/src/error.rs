//! # Error Types
//!
//! Errors shared by every crate in the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for the core primitives.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A caller-supplied tier string is outside the closed enumeration.
    #[error(transparent)]
    InvalidTier(#[from] InvalidTierName),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// A string that names none of the tiers. Carries the rejected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid tier: {0:?} (expected one of free, pro, elite)")]
pub struct InvalidTierName(pub String);

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_name_error_passes_through_unchanged() {
        let err = CoreError::from(InvalidTierName("gold".into()));
        assert_eq!(
            err.to_string(),
            r#"invalid tier: "gold" (expected one of free, pro, elite)"#
        );
        assert!(matches!(err, CoreError::InvalidTier(InvalidTierName(ref v)) if v == "gold"));
    }

    #[test]
    fn float_rejection_is_a_canonicalization_error() {
        let err = CoreError::from(CanonicalizationError::FloatRejected(0.5));
        assert!(matches!(err, CoreError::Canonicalization(_)));
        assert!(err.to_string().starts_with("canonicalization error"));
    }
}
