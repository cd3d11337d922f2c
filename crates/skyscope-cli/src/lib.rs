//! # skyscope-cli: Operator Tooling
//!
//! Provides the `skyscope` command-line interface.
//!
//! ## Subcommands
//!
//! - `skyscope keygen`: Generate a signing seed for `SKYSCOPE_SIGNING_KEY_HEX`.
//! - `skyscope issue`: Sign a tier credential offline.
//! - `skyscope verify`: Check a credential and report why it fails.
//! - `skyscope stats`: Tier-scoped statistics for a data directory.
//!
//! ```bash
//! export SKYSCOPE_SIGNING_KEY_HEX=$(skyscope keygen --seed-only)
//! skyscope issue --tier pro
//! skyscope stats --data-dir ./data --dataset routes --tier free
//! ```

pub mod credential;
pub mod stats;

/// Environment variable holding the signing seed, shared with the API server.
pub const SIGNING_KEY_ENV: &str = "SKYSCOPE_SIGNING_KEY_HEX";
