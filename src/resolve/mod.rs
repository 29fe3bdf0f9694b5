//! Version-set resolution
//!
//! Pure functions over a package's published versions:
//! - resolve_max_satisfying: highest version admitted by a declared range
//! - resolve_latest: the package's globally latest version per policy
//!
//! Both return `None` for a miss (unparseable range, nothing satisfies,
//! empty version set); a miss drops the row downstream, it never fails
//! the run.

mod range;

pub use range::RangeSet;

use crate::domain::{PackageMetadata, PublishedVersion};
use semver::Version;
use serde::{Deserialize, Serialize};

/// How the globally latest version of a package is chosen
///
/// Registries usually maintain a `latest` dist-tag; when they do not, the
/// fallback is an assumption, so hosts pick the policy explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatestPolicy {
    /// The registry's `latest` dist-tag when it names a fetched version,
    /// else the maximum semantic version
    #[default]
    DistTagThenMax,
    /// The maximum semantic version, ignoring dist-tags
    MaxVersion,
    /// The maximum non-pre-release version; pre-release-only packages fall
    /// back to the maximum overall
    MaxStable,
}

/// Highest published version satisfying `requested_range`
///
/// Order-independent over `versions`; `None` when the range is unparseable
/// or nothing satisfies it.
pub fn resolve_max_satisfying<'a>(
    versions: &'a [PublishedVersion],
    requested_range: &str,
) -> Option<&'a PublishedVersion> {
    let range = RangeSet::parse(requested_range)?;
    versions
        .iter()
        .filter(|pv| range.satisfies(&pv.version))
        .max()
}

/// The package's globally latest version under the given policy
pub fn resolve_latest(metadata: &PackageMetadata, policy: LatestPolicy) -> Option<&PublishedVersion> {
    match policy {
        LatestPolicy::DistTagThenMax => metadata
            .latest_tag()
            .and_then(|tag| Version::parse(tag).ok())
            .and_then(|tagged| metadata.find_version(&tagged))
            .or_else(|| metadata.versions.iter().max()),
        LatestPolicy::MaxVersion => metadata.versions.iter().max(),
        LatestPolicy::MaxStable => metadata
            .versions
            .iter()
            .filter(|pv| !pv.is_prerelease())
            .max()
            .or_else(|| metadata.versions.iter().max()),
    }
}
