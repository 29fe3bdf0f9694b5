//! Registry access
//!
//! This module provides:
//! - HTTP client foundation with configurable timeout and User-Agent
//! - npm registry fetcher producing per-package metadata
//!
//! There is deliberately no retry logic here: a fetch gets exactly one
//! attempt per run, and whatever comes back is that run's outcome for the
//! package.

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::NpmRegistry;

use crate::domain::LookupOutcome;
use async_trait::async_trait;

/// One metadata fetch per package name
///
/// Implementations never fail at the call boundary; every failure mode is
/// a [`LookupOutcome`] variant.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetch the published-version metadata for `package`
    async fn fetch_metadata(&self, package: &str) -> LookupOutcome;
}
