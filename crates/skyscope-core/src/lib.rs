//! # skyscope-core: Foundational Types for Skyscope
//!
//! Skyscope serves aviation reference data (airlines, airports, flight
//! routes) scoped by the caller's subscription tier. This crate defines the
//! primitives every other crate agrees on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`Tier` is a closed enum.** `Free < Pro < Elite`, exhaustive `match`
//!    everywhere. Adding a tier forces the policy table, the decision
//!    function and the dataset filter to handle it at compile time.
//!
//! 2. **Countries are exact strings.** Country names are compared
//!    case-sensitively with no normalization. The sentinel
//!    [`UNKNOWN_COUNTRY`] marks a country that could not be resolved and is
//!    never a valid grouping key.
//!
//! 3. **`CanonicalBytes` newtype.** Every signed payload flows through
//!    `CanonicalBytes::new()` (RFC 8785 JSON), so issuer and verifier sign
//!    and check the same byte sequence.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `skyscope-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod country;
pub mod error;
pub mod record;
pub mod tier;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use country::{is_resolved_country, UNKNOWN_COUNTRY};
pub use error::{CanonicalizationError, CoreError, InvalidTierName};
pub use record::{AirlineRecord, AirportRecord, HasCountry, RouteRecord};
pub use tier::{Tier, TIER_COUNT};
