//! # Subscription Tiers
//!
//! Defines the `Tier` enum: the caller's subscription level. A tier is never
//! persisted server-side; it is carried inside a signed credential, and the
//! absence of a credential means [`Tier::Free`].
//!
//! The `Ord` derivation respects variant declaration order:
//! `Free < Pro < Elite`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InvalidTierName;

/// Subscription tiers, ordered by entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Default tier. Represented by the absence of a credential.
    Free,
    /// Paid tier with a wider country allow-list.
    Pro,
    /// Unrestricted tier.
    Elite,
}

/// Total number of tiers.
pub const TIER_COUNT: usize = 3;

impl Tier {
    /// Returns all tiers in ascending order.
    pub fn all() -> &'static [Tier] {
        &[Self::Free, Self::Pro, Self::Elite]
    }

    /// Returns the lowercase identifier for this tier.
    ///
    /// Matches the serde representation and the tier claim inside credentials.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Elite => "elite",
        }
    }

    /// Whether credentials are ever issued for this tier.
    pub fn is_credentialed(&self) -> bool {
        match self {
            Self::Free => false,
            Self::Pro | Self::Elite => true,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::Free
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = InvalidTierName;

    /// Parse a tier from its identifier, ignoring ASCII case.
    ///
    /// Unknown values are rejected, never coerced to `Free`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "elite" => Ok(Self::Elite),
            _ => Err(InvalidTierName(s.to_string())),
        }
    }
}
