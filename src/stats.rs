//! Freshness aggregation
//!
//! Joins each input dependency with its lookup outcome, drives the
//! resolver and the age calculation, and emits the final row set. Rows
//! whose lookup failed or whose range admits nothing are dropped; the
//! shrunken row count is the only partial-failure signal this layer
//! exposes.

use crate::domain::{Dependency, LookupOutcome, StatRow};
use crate::freshness::age_seconds;
use crate::resolve::{resolve_latest, resolve_max_satisfying, LatestPolicy};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Compute the freshness rows for `dependencies` against `outcomes`
///
/// `now` is fixed once by the caller so every row in one output shares the
/// same reference instant. Output order matches input order; duplicate
/// names collapse last-write-wins before any row is built.
pub fn compute_stats(
    dependencies: &[Dependency],
    outcomes: &HashMap<String, LookupOutcome>,
    now: DateTime<Utc>,
    latest_policy: LatestPolicy,
) -> Vec<StatRow> {
    let mut rows = Vec::new();

    for dep in dedupe_last_write_wins(dependencies) {
        let Some(metadata) = outcomes.get(&dep.name).and_then(LookupOutcome::success) else {
            debug!("{}: no usable lookup outcome, dropping row", dep.name);
            continue;
        };
        let Some(satisfied) = resolve_max_satisfying(&metadata.versions, &dep.requested_range)
        else {
            debug!(
                "{}: no published version satisfies '{}', dropping row",
                dep.name, dep.requested_range
            );
            continue;
        };
        let Some(latest) = resolve_latest(metadata, latest_policy) else {
            continue;
        };

        rows.push(StatRow {
            package: dep.name.clone(),
            is_dev: dep.is_dev,
            requested_range: dep.requested_range.clone(),
            max_satisfied_version: satisfied.version.clone(),
            max_satisfied_published_at: satisfied.published_at,
            max_satisfied_age_secs: age_seconds(satisfied.published_at, now),
            latest_version: latest.version.clone(),
            latest_published_at: latest.published_at,
            latest_age_secs: age_seconds(latest.published_at, now),
        });
    }

    rows
}

/// Collapse duplicate names, keeping the last occurrence at the position
/// of the first so output order stays stable
fn dedupe_last_write_wins(dependencies: &[Dependency]) -> Vec<&Dependency> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut kept: Vec<&Dependency> = Vec::new();
    for dep in dependencies {
        match position.get(dep.name.as_str()) {
            Some(&i) => kept[i] = dep,
            None => {
                position.insert(dep.name.as_str(), kept.len());
                kept.push(dep);
            }
        }
    }
    kept
}
