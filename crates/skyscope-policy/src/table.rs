//! # Tier Policy Table
//!
//! One [`TierPolicy`] per tier. The table is built once at startup, either
//! from [`PolicyTable::standard()`] or from a YAML document, and is
//! read-only afterwards.
//!
//! ## YAML Format
//!
//! ```yaml
//! tiers:
//!   free:
//!     countries: [Israel]
//!   pro:
//!     countries: [Israel, United States, Germany]
//!   elite:
//!     unrestricted: true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skyscope_core::{is_resolved_country, Tier, UNKNOWN_COUNTRY};

use crate::error::{AccessError, PolicyError};

/// Countries visible to the PRO tier in the standard deployment, in configured order.
pub const STANDARD_PRO_COUNTRIES: [&str; 11] = [
    "Israel",
    "United States",
    "United Kingdom",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Netherlands",
    "Canada",
    "Switzerland",
    "Greece",
];

/// The countries a tier may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyEntry", into = "PolicyEntry")]
pub enum TierPolicy {
    /// Every country, including ones not known at configuration time.
    Unrestricted,
    /// Exactly these countries, in configured order.
    Countries(Vec<String>),
}

impl TierPolicy {
    /// Build a list policy from country names.
    pub fn countries<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Countries(countries.into_iter().map(Into::into).collect())
    }

    /// Whether this policy lets a caller see `country`.
    ///
    /// List policies use exact, case-sensitive matching and never admit an
    /// unresolved country.
    pub fn permits(&self, country: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Countries(list) => {
                is_resolved_country(country) && list.iter().any(|c| c == country)
            }
        }
    }

    /// The configured list, or `None` when unrestricted.
    pub fn listed_countries(&self) -> Option<&[String]> {
        match self {
            Self::Unrestricted => None,
            Self::Countries(list) => Some(list),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

/// On-disk shape of one policy entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    countries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    unrestricted: bool,
}

impl TryFrom<PolicyEntry> for TierPolicy {
    type Error = String;

    fn try_from(entry: PolicyEntry) -> Result<Self, Self::Error> {
        match (entry.countries, entry.unrestricted) {
            (None, true) => Ok(Self::Unrestricted),
            (Some(_), true) => {
                Err("a policy cannot list countries and be unrestricted".to_string())
            }
            (None, false) => {
                Err("a policy must set either `countries` or `unrestricted: true`".to_string())
            }
            (Some(list), false) => {
                if let Some(bad) = list.iter().find(|c| !is_resolved_country(c)) {
                    return Err(format!(
                        "country list entry {bad:?} is not a country (empty or {UNKNOWN_COUNTRY:?})"
                    ));
                }
                Ok(Self::Countries(list))
            }
        }
    }
}

impl From<TierPolicy> for PolicyEntry {
    fn from(policy: TierPolicy) -> Self {
        match policy {
            TierPolicy::Unrestricted => Self {
                countries: None,
                unrestricted: true,
            },
            TierPolicy::Countries(list) => Self {
                countries: Some(list),
                unrestricted: false,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    tiers: BTreeMap<Tier, TierPolicy>,
}

/// Per-tier policies, injected into every component that makes access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: BTreeMap<Tier, TierPolicy>,
}

impl PolicyTable {
    /// The standard deployment table.
    ///
    /// FREE sees Israel only, PRO sees [`STANDARD_PRO_COUNTRIES`], ELITE is
    /// unrestricted.
    pub fn standard() -> Self {
        Self::from_entries([
            (Tier::Free, TierPolicy::countries(["Israel"])),
            (Tier::Pro, TierPolicy::countries(STANDARD_PRO_COUNTRIES)),
            (Tier::Elite, TierPolicy::Unrestricted),
        ])
    }

    /// Build a table from explicit entries. Tiers may be left out; looking
    /// them up later fails with [`AccessError::UnknownTier`].
    pub fn from_entries(entries: impl IntoIterator<Item = (Tier, TierPolicy)>) -> Self {
        Self {
            policies: entries.into_iter().collect(),
        }
    }

    /// Parse a complete table from YAML. Every tier must be defined.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyError> {
        let doc: PolicyDocument = serde_yaml::from_str(yaml)?;
        let missing: Vec<&str> = Tier::all()
            .iter()
            .filter(|t| !doc.tiers.contains_key(t))
            .map(Tier::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(PolicyError::Invalid(format!(
                "missing policy for tier(s): {}",
                missing.join(", ")
            )));
        }
        Ok(Self {
            policies: doc.tiers,
        })
    }

    /// Read and parse a YAML policy file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let table = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = %path.display(), "loaded tier policy table");
        Ok(table)
    }

    /// Render the table as YAML in the format [`PolicyTable::from_yaml_str`] reads.
    pub fn to_yaml_string(&self) -> Result<String, PolicyError> {
        let doc = PolicyDocument {
            tiers: self.policies.clone(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }

    /// The policy for `tier`.
    pub fn policy_for(&self, tier: Tier) -> Result<&TierPolicy, AccessError> {
        self.policies
            .get(&tier)
            .ok_or(AccessError::UnknownTier(tier))
    }

    /// Configured tiers and their policies, in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &TierPolicy)> {
        self.policies.iter().map(|(tier, policy)| (*tier, policy))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}
