//! Registry-side package metadata
//!
//! This module provides:
//! - PublishedVersion: one released version with its publish instant
//! - PackageMetadata: everything the registry reports for one package

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The dist-tag registries use to mark the current release
pub const LATEST_TAG: &str = "latest";

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVersion {
    /// Parsed semantic version
    pub version: Version,
    /// When this version was published
    pub published_at: DateTime<Utc>,
}

impl PublishedVersion {
    /// Creates a new PublishedVersion
    pub fn new(version: Version, published_at: DateTime<Utc>) -> Self {
        Self {
            version,
            published_at,
        }
    }

    /// Whether this version carries a pre-release tag
    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

impl Ord for PublishedVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Semver precedence decides; publish instants only break exact ties
        // so Ord stays consistent with the derived Eq.
        self.version
            .cmp(&other.version)
            .then_with(|| self.published_at.cmp(&other.published_at))
    }
}

impl PartialOrd for PublishedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything the registry reports for one package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name as known to the registry
    pub name: String,
    /// All published versions with usable publish timestamps
    pub versions: Vec<PublishedVersion>,
    /// Registry dist-tags (tag name → version string)
    pub dist_tags: HashMap<String, String>,
}

impl PackageMetadata {
    /// Creates new PackageMetadata
    pub fn new(
        name: impl Into<String>,
        versions: Vec<PublishedVersion>,
        dist_tags: HashMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            versions,
            dist_tags,
        }
    }

    /// The version string the registry's `latest` dist-tag points at, if any
    pub fn latest_tag(&self) -> Option<&str> {
        self.dist_tags.get(LATEST_TAG).map(String::as_str)
    }

    /// Looks up the published entry for an exact version
    pub fn find_version(&self, version: &Version) -> Option<&PublishedVersion> {
        self.versions.iter().find(|pv| &pv.version == version)
    }
}
