//! Error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: failures while talking to the package registry
//! - DriftError: host-facing misuse (bad configuration)
//!
//! Registry failures never escape the fetch boundary as `Err` values; the
//! npm fetcher folds them into `LookupOutcome` variants so a single bad
//! package degrades one row instead of aborting a run.

use thiserror::Error;

/// Errors raised while communicating with the package registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package does not exist in the registry (HTTP 404)
    #[error("package '{package}' not found in registry")]
    PackageNotFound { package: String },

    /// Network request failed or the registry answered with a non-success status
    #[error("failed to fetch package '{package}': {message}")]
    NetworkError { package: String, message: String },

    /// Request exceeded the configured timeout
    #[error("timeout while fetching package '{package}'")]
    Timeout { package: String },

    /// Response body did not match the expected registry schema
    #[error("invalid registry response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced to the embedding host
#[derive(Error, Debug)]
pub enum DriftError {
    /// Pipeline configuration is unusable
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Registry client could not be constructed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DriftError {
    /// Creates a new InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DriftError::InvalidConfig {
            message: message.into(),
        }
    }
}
