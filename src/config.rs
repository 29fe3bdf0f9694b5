//! Pipeline configuration
//!
//! Hosts embed the pipeline with a [`PipelineConfig`], typically deserialized
//! from their own settings document. Every field has a default so a plain
//! `PipelineConfig::default()` talks to the public npm registry.

use crate::error::DriftError;
use crate::resolve::LatestPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Default registry endpoint (the public npm registry)
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default maximum number of in-flight registry fetches
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;

/// Default per-fetch timeout in milliseconds (30 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

/// Default debounce window for the trigger stage in milliseconds
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("depdrift/", env!("CARGO_PKG_VERSION"));

/// Configuration for one freshness pipeline instance
///
/// Changing the registry endpoint means building a new pipeline from the
/// updated config; a running coordinator never re-reads its configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Base URL of the registry to query
    pub registry_url: String,
    /// Maximum number of concurrent registry fetches
    pub max_in_flight: usize,
    /// Timeout applied to each individual fetch, in milliseconds
    pub fetch_timeout_ms: u64,
    /// Quiet window the debounced trigger waits for before starting a run,
    /// in milliseconds
    pub debounce_delay_ms: u64,
    /// How the globally latest version is chosen
    pub latest_policy: LatestPolicy,
    /// User-Agent header sent with registry requests
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            latest_policy: LatestPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration before building a pipeline from it
    pub fn validate(&self) -> Result<(), DriftError> {
        if self.max_in_flight == 0 {
            return Err(DriftError::invalid_config("max_in_flight must be at least 1"));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(DriftError::invalid_config("fetch_timeout_ms must be at least 1"));
        }
        if !self.registry_url.starts_with("http://") && !self.registry_url.starts_with("https://") {
            return Err(DriftError::invalid_config(format!(
                "registry_url '{}' must be an http(s) URL",
                self.registry_url
            )));
        }
        Ok(())
    }

    /// Per-fetch timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Debounce window as a [`Duration`]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }
}
