//! # skyscope-dataset: Tier-Scoped Aviation Datasets
//!
//! Holds the three record collections (airlines, airports, routes) loaded at
//! startup and answers every read through the caller's tier policy.
//!
//! ## Components
//!
//! - [`loader`]: OpenFlights `.dat` parsing into core record types.
//! - [`AirportCountryIndex`]: airport code to country, used to derive route
//!   endpoints on read.
//! - [`DatasetFilter`]: one generic filter for every record kind. The
//!   per-kind difference lives entirely in its [`CountryKey`] parameter:
//!   airlines and airports use [`DirectCountry`], routes use
//!   [`RouteCountries`] (match on either endpoint, group by source).
//! - [`Catalog`]: the three filters sharing one policy table.
//!
//! Nothing here mutates after construction. Filters are `Send + Sync` and
//! are read concurrently without locks.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod index;
pub mod loader;
pub mod routes;

pub use catalog::{AirlineFilter, AirportFilter, Catalog, DatasetKind, RouteFilter};
pub use error::{DatasetError, LoadError};
pub use filter::{
    CountryKey, DatasetFilter, DatasetStatistics, DirectCountry, LabelledStatistics,
    RecordCountries,
};
pub use index::AirportCountryIndex;
pub use loader::{Datasets, LoadReport};
pub use routes::{ResolvedRoute, RouteCountries};
