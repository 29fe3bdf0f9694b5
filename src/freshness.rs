//! Age computation for published versions
//!
//! The aggregator fixes one reference instant per pass and feeds it to
//! every row, so a single output never mixes clocks.

use chrono::{DateTime, Utc};

/// Whole seconds elapsed between `published_at` and `now`
///
/// Clamped to zero when `published_at` lies in the future (clock skew is
/// policy-clamped, not an error).
pub fn age_seconds(published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published_at).num_seconds().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_day_old() {
        let now = reference_now();
        assert_eq!(age_seconds(now - chrono::Duration::seconds(86_400), now), 86_400);
    }

    #[test]
    fn test_published_right_now() {
        let now = reference_now();
        assert_eq!(age_seconds(now, now), 0);
    }

    #[test]
    fn test_future_publish_clamps_to_zero() {
        let now = reference_now();
        assert_eq!(age_seconds(now + chrono::Duration::seconds(300), now), 0);
    }

    #[test]
    fn test_subsecond_truncates() {
        let now = reference_now();
        assert_eq!(
            age_seconds(now - chrono::Duration::milliseconds(1_500), now),
            1
        );
    }
}
