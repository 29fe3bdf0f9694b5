//! Per-package lookup outcomes

use super::PackageMetadata;
use crate::error::RegistryError;
use serde::{Deserialize, Serialize};

/// Result of one registry lookup for one package name
///
/// Fetch failures are data, not errors: a failed lookup degrades the rows
/// that depended on it and never aborts the run it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    /// Metadata fetched and parsed
    Success(PackageMetadata),
    /// The registry does not know the package
    NotFound,
    /// Network, timeout, or non-success HTTP failure
    TransportError(String),
    /// Response did not match the expected registry schema
    ParseError(String),
}

impl LookupOutcome {
    /// Whether the lookup produced usable metadata
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success(_))
    }

    /// The fetched metadata, if the lookup succeeded
    pub fn success(&self) -> Option<&PackageMetadata> {
        match self {
            LookupOutcome::Success(metadata) => Some(metadata),
            _ => None,
        }
    }
}

impl From<RegistryError> for LookupOutcome {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::PackageNotFound { .. } => LookupOutcome::NotFound,
            RegistryError::NetworkError { .. } | RegistryError::Timeout { .. } => {
                LookupOutcome::TransportError(err.to_string())
            }
            RegistryError::InvalidResponse { .. } => LookupOutcome::ParseError(err.to_string()),
        }
    }
}
