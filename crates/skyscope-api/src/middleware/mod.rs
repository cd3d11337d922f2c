//! # Middleware
//!
//! Request metrics and HTTP tracing. Tier resolution lives in
//! [`crate::auth`].

pub mod metrics;
pub mod trace;
