//! # Policy and Access Errors

use skyscope_core::{InvalidTierName, Tier};
use thiserror::Error;

/// Failure of an access-controlled operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A caller-supplied tier string is not a tier.
    #[error("invalid tier: {0:?}")]
    InvalidTier(String),

    /// The policy table has no entry for this tier. A configuration defect.
    #[error("no access policy configured for tier '{0}'")]
    UnknownTier(Tier),

    /// The tier's policy does not allow the requested country or country pair.
    /// Carries the human-readable denial reason.
    #[error("{0}")]
    AccessDenied(String),
}

impl From<InvalidTierName> for AccessError {
    fn from(InvalidTierName(value): InvalidTierName) -> Self {
        Self::InvalidTier(value)
    }
}

/// Failure loading or validating a policy table.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The policy document is not valid YAML for the expected shape.
    #[error("policy document could not be parsed: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The policy document parsed but violates a table rule.
    #[error("invalid policy table: {0}")]
    Invalid(String),

    /// The policy file could not be read.
    #[error("policy file could not be read: {0}")]
    Io(#[from] std::io::Error),
}
