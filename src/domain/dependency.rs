//! Dependency information structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// One dependency entry as declared in a project manifest
///
/// Identity within a run is the package name. When the same name appears
/// more than once in an input list, the pipeline keeps the last occurrence
/// (last-write-wins) so every output row maps back to exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Declared version range, e.g. `^1.2.3` or `>=1.0.0 <2.0.0`
    pub requested_range: String,
    /// Whether this is a development dependency
    pub is_dev: bool,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, requested_range: impl Into<String>, is_dev: bool) -> Self {
        Self {
            name: name.into(),
            requested_range: requested_range.into(),
            is_dev,
        }
    }

    /// Creates a new production dependency
    pub fn production(name: impl Into<String>, requested_range: impl Into<String>) -> Self {
        Self::new(name, requested_range, false)
    }

    /// Creates a new development dependency
    pub fn development(name: impl Into<String>, requested_range: impl Into<String>) -> Self {
        Self::new(name, requested_range, true)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.requested_range, dev_marker)
    }
}
