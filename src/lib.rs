//! depdrift - dependency freshness resolution pipeline
//!
//! Given a manifest's dependency list, this library concurrently fetches
//! each package's published-version metadata from an npm-compatible
//! registry and reports, per dependency:
//! - the highest published version its declared range admits, and
//! - the package's globally latest version,
//!
//! each with its publish instant and age in seconds. The pipeline is
//! host-embedded: feed dependency lists through [`trigger::DebouncedTrigger`]
//! (or call [`coordinator::LookupCoordinator::lookup`] directly), observe
//! progress and outcomes incrementally, and render
//! [`stats::compute_stats`]'s rows however you like.

pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod freshness;
pub mod registry;
pub mod resolve;
pub mod stats;
pub mod trigger;
