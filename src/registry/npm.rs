//! npm registry fetcher
//!
//! Fetches the per-package metadata document from an npm-compatible
//! registry. API endpoint: {base_url}/{package}
//!
//! Schema knowledge lives here and nowhere else: the document's `versions`
//! map supplies the version strings, the `time` map their publish
//! instants, and `dist-tags` the registry's own pointers.

use crate::config::DEFAULT_REGISTRY_URL;
use crate::domain::{LookupOutcome, PackageMetadata, PublishedVersion};
use crate::registry::{HttpClient, MetadataFetcher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// npm per-package metadata document, reduced to the fields we read
///
/// All fields default so that a well-formed but wrong-shaped document
/// (e.g. an error body) surfaces as "no usable versions" instead of a
/// deserialization failure.
#[derive(Debug, Deserialize)]
struct NpmPackageDocument {
    /// Version string → version manifest (contents unused)
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
    /// Version string → RFC 3339 publish instant; also carries the
    /// `created` and `modified` pseudo-entries, which never match a
    /// version key
    #[serde(default)]
    time: HashMap<String, String>,
    /// Registry dist-tags, `latest` among them
    #[serde(default, rename = "dist-tags")]
    dist_tags: HashMap<String, String>,
}

/// Fetcher for npm-compatible registries
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    /// Create a fetcher against the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_REGISTRY_URL)
    }

    /// Create a fetcher against a custom registry endpoint
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode a package name for the URL path (scoped packages keep their
    /// `@` but escape the slash)
    fn encode_package_name(package: &str) -> String {
        if package.starts_with('@') {
            package.replace('/', "%2F")
        } else {
            package.to_string()
        }
    }

    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, Self::encode_package_name(package))
    }

    fn parse_document(package: &str, doc: NpmPackageDocument) -> LookupOutcome {
        let mut versions = Vec::new();
        for version_str in doc.versions.keys() {
            let Some(time_str) = doc.time.get(version_str) else {
                debug!("{}: version {} has no publish time, skipping", package, version_str);
                continue;
            };
            let Ok(published_at) = time_str.parse::<DateTime<Utc>>() else {
                debug!("{}: unparseable publish time '{}' for {}", package, time_str, version_str);
                continue;
            };
            let Ok(version) = Version::parse(version_str) else {
                debug!("{}: non-semver version string '{}'", package, version_str);
                continue;
            };
            versions.push(PublishedVersion::new(version, published_at));
        }

        if versions.is_empty() {
            return LookupOutcome::ParseError(format!(
                "registry document for '{}' contains no usable versions",
                package
            ));
        }

        versions.sort();
        LookupOutcome::Success(PackageMetadata::new(package, versions, doc.dist_tags))
    }
}

#[async_trait]
impl MetadataFetcher for NpmRegistry {
    async fn fetch_metadata(&self, package: &str) -> LookupOutcome {
        let url = self.build_url(package);
        debug!("fetching {} from {}", package, url);

        match self.client.get_json::<NpmPackageDocument>(&url, package).await {
            Ok(doc) => Self::parse_document(package, doc),
            Err(e) => {
                warn!("lookup failed for {}: {}", package, e);
                LookupOutcome::from(e)
            }
        }
    }
}
