//! # skyscope-policy: Tier Access Policy
//!
//! Maps each [`Tier`](skyscope_core::Tier) to the set of countries whose
//! records it may see, and turns that mapping into allow/deny decisions.
//!
//! - **Policy table** ([`PolicyTable`]): one [`TierPolicy`] per tier, either
//!   an ordered country list or unrestricted. An explicit value injected
//!   wherever decisions are made, never a global.
//! - **Decisions** ([`AccessDecision`]): `has_country_access`,
//!   `check_access` (single country) and `check_pair_access` (both
//!   endpoints of a route must pass).
//!
//! Each tier's list is checked on its own. Nothing assumes that a higher
//! tier's list contains a lower tier's list.

pub mod decision;
pub mod error;
pub mod table;

pub use decision::AccessDecision;
pub use error::{AccessError, PolicyError};
pub use table::{PolicyTable, TierPolicy, STANDARD_PRO_COUNTRIES};
