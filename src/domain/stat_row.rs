//! Final per-dependency freshness record

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

/// One row of the pipeline's output
///
/// Derived wholesale from a dependency, its lookup outcome, and a shared
/// reference instant; never mutated in place. Both ages are measured in
/// whole seconds and are never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
    /// Package name
    pub package: String,
    /// Whether the dependency was declared as a dev dependency
    pub is_dev: bool,
    /// The range the manifest declared
    pub requested_range: String,
    /// Highest published version satisfying the requested range
    pub max_satisfied_version: Version,
    /// Publish instant of the max-satisfying version
    pub max_satisfied_published_at: DateTime<Utc>,
    /// Age of the max-satisfying version in seconds
    pub max_satisfied_age_secs: i64,
    /// Globally latest version per the configured policy
    pub latest_version: Version,
    /// Publish instant of the latest version
    pub latest_published_at: DateTime<Utc>,
    /// Age of the latest version in seconds
    pub latest_age_secs: i64,
}

impl StatRow {
    /// Seconds the allowed version lags behind the latest release
    ///
    /// Zero when the range already admits the latest version.
    pub fn drift_secs(&self) -> i64 {
        (self.max_satisfied_age_secs - self.latest_age_secs).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_row() -> StatRow {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        StatRow {
            package: "left-pad".to_string(),
            is_dev: false,
            requested_range: "^1.0.0".to_string(),
            max_satisfied_version: Version::new(1, 3, 0),
            max_satisfied_published_at: now - chrono::Duration::days(400),
            max_satisfied_age_secs: 400 * 86_400,
            latest_version: Version::new(2, 0, 0),
            latest_published_at: now - chrono::Duration::days(30),
            latest_age_secs: 30 * 86_400,
        }
    }

    #[test]
    fn test_drift_secs() {
        let row = sample_row();
        assert_eq!(row.drift_secs(), 370 * 86_400);
    }

    #[test]
    fn test_drift_never_negative() {
        let mut row = sample_row();
        // Range admits the latest release: satisfied version is the newer one
        row.max_satisfied_age_secs = 10;
        row.latest_age_secs = 500;
        assert_eq!(row.drift_secs(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let row = sample_row();
        let json = serde_json::to_string(&row).unwrap();
        let parsed: StatRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }
}
