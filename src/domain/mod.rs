//! Core data model for the freshness pipeline
//!
//! This module provides:
//! - Dependency: one manifest entry (name, requested range, dev flag)
//! - PublishedVersion / PackageMetadata: registry-side facts about a package
//! - LookupOutcome: per-package fetch result, success or typed failure
//! - LookupProgress: total vs. fulfilled counters for one run
//! - StatRow: the final per-dependency freshness record

mod dependency;
mod metadata;
mod outcome;
mod progress;
mod stat_row;

pub use dependency::Dependency;
pub use metadata::{PackageMetadata, PublishedVersion};
pub use outcome::LookupOutcome;
pub use progress::LookupProgress;
pub use stat_row::StatRow;
