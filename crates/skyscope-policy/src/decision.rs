//! # Access Decisions
//!
//! Pure functions of `(table, tier, country)`. No I/O, no state.
//!
//! A pair decision is the conjunction of two single decisions. Its denial
//! reason does not say which side failed.

use serde::Serialize;
use skyscope_core::Tier;

use crate::error::AccessError;
use crate::table::PolicyTable;

/// Outcome of an access check.
///
/// `reason` is present exactly when `allowed` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert a denial into [`AccessError::AccessDenied`].
    pub fn into_result(self) -> Result<(), AccessError> {
        match (self.allowed, self.reason) {
            (true, _) => Ok(()),
            (false, Some(reason)) => Err(AccessError::AccessDenied(reason)),
            (false, None) => Err(AccessError::AccessDenied("access denied".to_string())),
        }
    }
}

fn country_denied_reason(country: &str, tier: Tier) -> String {
    format!("Country '{country}' is not accessible with {tier} tier")
}

fn pair_denied_reason(source: &str, destination: &str) -> String {
    format!("Access to routes between '{source}' and '{destination}' requires a higher subscription tier")
}

impl PolicyTable {
    /// Whether `tier` may see records from `country`.
    pub fn has_country_access(&self, tier: Tier, country: &str) -> Result<bool, AccessError> {
        Ok(self.policy_for(tier)?.permits(country))
    }

    /// Single-country decision with a denial reason naming the country and tier.
    pub fn check_access(&self, tier: Tier, country: &str) -> Result<AccessDecision, AccessError> {
        let decision = if self.has_country_access(tier, country)? {
            AccessDecision::allow()
        } else {
            AccessDecision::deny(country_denied_reason(country, tier))
        };
        Ok(decision)
    }

    /// Route-pair decision: allowed only if both countries are allowed.
    pub fn check_pair_access(
        &self,
        tier: Tier,
        source: &str,
        destination: &str,
    ) -> Result<AccessDecision, AccessError> {
        let policy = self.policy_for(tier)?;
        let decision = if policy.permits(source) && policy.permits(destination) {
            AccessDecision::allow()
        } else {
            AccessDecision::deny(pair_denied_reason(source, destination))
        };
        Ok(decision)
    }
}
