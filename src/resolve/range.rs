//! npm semver range grammar
//!
//! Supported syntax:
//! - `1.2.3` - exact match; `1.2` / `1` match the whole minor / major span
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0, 0.x special cases)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0; `~1` spans the major)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `=1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `*` - wildcards
//! - `1.2.3 - 2.0.0` - hyphen ranges (inclusive, partial upper bounds widen)
//! - space-separated comparators AND together, `||` unions alternatives
//!
//! Everything desugars into interval comparators at parse time, so
//! satisfaction is a plain conjunction check per alternative. Pre-release
//! versions only satisfy an alternative that itself mentions a pre-release
//! on the same `major.minor.patch` triple, matching registry semantics.

use semver::Version;
use std::cmp::Ordering;

/// How many version components the author actually wrote
///
/// Partial versions widen the operators they appear under: `>1.2` excludes
/// the whole `1.2.x` span, `~1` spans the major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Major,
    Minor,
    Patch,
}

/// A single desugared comparator
#[derive(Debug, Clone, PartialEq, Eq)]
enum Comparator {
    Exact(Version),
    Gte(Version),
    Gt(Version),
    Lte(Version),
    Lt(Version),
}

impl Comparator {
    fn matches(&self, version: &Version) -> bool {
        match self {
            Comparator::Exact(v) => version.cmp_precedence(v) == Ordering::Equal,
            Comparator::Gte(v) => version.cmp_precedence(v) != Ordering::Less,
            Comparator::Gt(v) => version.cmp_precedence(v) == Ordering::Greater,
            Comparator::Lte(v) => version.cmp_precedence(v) != Ordering::Greater,
            Comparator::Lt(v) => version.cmp_precedence(v) == Ordering::Less,
        }
    }

    /// The version the comparator was anchored on, for pre-release gating
    fn anchor(&self) -> &Version {
        match self {
            Comparator::Exact(v)
            | Comparator::Gte(v)
            | Comparator::Gt(v)
            | Comparator::Lte(v)
            | Comparator::Lt(v) => v,
        }
    }
}

/// One `||` alternative: a conjunction of comparators
///
/// An empty conjunction (`*`, `x`, or an empty range string) matches every
/// release version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ComparatorGroup {
    comparators: Vec<Comparator>,
}

impl ComparatorGroup {
    fn satisfies(&self, version: &Version) -> bool {
        if !self.comparators.iter().all(|c| c.matches(version)) {
            return false;
        }
        if version.pre.is_empty() {
            return true;
        }
        self.allows_prerelease_of(version)
    }

    /// Pre-release gating: some comparator must name a pre-release on the
    /// same `major.minor.patch` triple as `version`.
    fn allows_prerelease_of(&self, version: &Version) -> bool {
        self.comparators.iter().any(|c| {
            let anchor = c.anchor();
            !anchor.pre.is_empty()
                && anchor.major == version.major
                && anchor.minor == version.minor
                && anchor.patch == version.patch
        })
    }
}

/// A parsed version range: the union of its `||` alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    groups: Vec<ComparatorGroup>,
}

impl RangeSet {
    /// Parse a range string; `None` means the range is unusable
    ///
    /// An empty or whitespace-only string parses as `*`, matching how
    /// registries treat a missing constraint.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Some(Self {
                groups: vec![ComparatorGroup::default()],
            });
        }

        let groups = trimmed
            .split("||")
            .map(parse_group)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { groups })
    }

    /// Whether `version` satisfies any alternative of the range
    pub fn satisfies(&self, version: &Version) -> bool {
        self.groups.iter().any(|g| g.satisfies(version))
    }
}

/// Parse one `||` alternative into its comparator conjunction
fn parse_group(input: &str) -> Option<ComparatorGroup> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.is_empty() {
        return Some(ComparatorGroup::default());
    }

    let mut comparators = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        // "1.2.3 - 2.0.0" arrives as three tokens
        if i + 2 < tokens.len() && tokens[i + 1] == "-" {
            let (from, _) = parse_loose(tokens[i])?;
            let (to, to_precision) = parse_loose(tokens[i + 2])?;
            comparators.push(Comparator::Gte(from));
            comparators.push(match to_precision {
                Precision::Patch => Comparator::Lte(to),
                Precision::Minor => Comparator::Lt(Version::new(to.major, to.minor + 1, 0)),
                Precision::Major => Comparator::Lt(Version::new(to.major + 1, 0, 0)),
            });
            i += 3;
        } else {
            comparators.extend(parse_comparator(tokens[i])?);
            i += 1;
        }
    }
    Some(ComparatorGroup { comparators })
}

/// Parse one comparator token into its desugared form
fn parse_comparator(token: &str) -> Option<Vec<Comparator>> {
    if let Some(rest) = token.strip_prefix(">=") {
        let (v, _) = parse_loose(rest)?;
        Some(vec![Comparator::Gte(v)])
    } else if let Some(rest) = token.strip_prefix("<=") {
        let (v, precision) = parse_loose(rest)?;
        // "<=1.2" admits everything in 1.2.x
        Some(vec![match precision {
            Precision::Patch => Comparator::Lte(v),
            Precision::Minor => Comparator::Lt(Version::new(v.major, v.minor + 1, 0)),
            Precision::Major => Comparator::Lt(Version::new(v.major + 1, 0, 0)),
        }])
    } else if let Some(rest) = token.strip_prefix('>') {
        let (v, precision) = parse_loose(rest)?;
        // ">1.2" excludes the whole 1.2.x span
        Some(vec![match precision {
            Precision::Patch => Comparator::Gt(v),
            Precision::Minor => Comparator::Gte(Version::new(v.major, v.minor + 1, 0)),
            Precision::Major => Comparator::Gte(Version::new(v.major + 1, 0, 0)),
        }])
    } else if let Some(rest) = token.strip_prefix('<') {
        let (v, _) = parse_loose(rest)?;
        Some(vec![Comparator::Lt(v)])
    } else if let Some(rest) = token.strip_prefix('^') {
        parse_caret(rest)
    } else if let Some(rest) = token.strip_prefix('~') {
        parse_tilde(rest)
    } else if let Some(rest) = token.strip_prefix('=') {
        let (v, precision) = parse_loose(rest)?;
        Some(span_for(v, precision))
    } else {
        parse_bare(token)
    }
}

/// Caret: nothing left of the first non-zero written component may change
fn parse_caret(rest: &str) -> Option<Vec<Comparator>> {
    let (v, precision) = parse_loose(rest)?;
    let upper = if v.major > 0 || precision == Precision::Major {
        Version::new(v.major + 1, 0, 0)
    } else if v.minor > 0 || precision == Precision::Minor {
        Version::new(0, v.minor + 1, 0)
    } else {
        Version::new(0, 0, v.patch + 1)
    };
    Some(vec![Comparator::Gte(v), Comparator::Lt(upper)])
}

/// Tilde: patch-level drift; with only a major written, minor-level drift
fn parse_tilde(rest: &str) -> Option<Vec<Comparator>> {
    let (v, precision) = parse_loose(rest)?;
    let upper = if precision == Precision::Major {
        Version::new(v.major + 1, 0, 0)
    } else {
        Version::new(v.major, v.minor + 1, 0)
    };
    Some(vec![Comparator::Gte(v), Comparator::Lt(upper)])
}

/// A token with no operator: exact version, partial span, or wildcard
fn parse_bare(token: &str) -> Option<Vec<Comparator>> {
    if is_wildcard_part(token) {
        return Some(Vec::new());
    }
    // "x.2.1" style: a leading wildcard makes the rest meaningless
    if token.split('.').next().is_some_and(is_wildcard_part) {
        return Some(Vec::new());
    }
    let (v, precision) = parse_loose(token)?;
    Some(span_for(v, precision))
}

fn span_for(v: Version, precision: Precision) -> Vec<Comparator> {
    match precision {
        Precision::Patch => vec![Comparator::Exact(v)],
        Precision::Minor => {
            let upper = Version::new(v.major, v.minor + 1, 0);
            vec![Comparator::Gte(v), Comparator::Lt(upper)]
        }
        Precision::Major => {
            let upper = Version::new(v.major + 1, 0, 0);
            vec![Comparator::Gte(v), Comparator::Lt(upper)]
        }
    }
}

fn is_wildcard_part(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Parse a possibly-partial version, recording how much of it was written
///
/// Strips a leading `v`, pads missing components with zeros, and treats a
/// trailing wildcard component as if the version stopped before it.
fn parse_loose(input: &str) -> Option<(Version, Precision)> {
    let input = input.trim();
    let stripped = input
        .strip_prefix('v')
        .or_else(|| input.strip_prefix('V'))
        .unwrap_or(input);

    if let Ok(v) = Version::parse(stripped) {
        return Some((v, Precision::Patch));
    }

    let mut numbers = Vec::new();
    for part in stripped.split('.').take(3) {
        if is_wildcard_part(part) {
            break;
        }
        numbers.push(part.parse::<u64>().ok()?);
    }
    match numbers.as_slice() {
        [major] => Some((Version::new(*major, 0, 0), Precision::Major)),
        [major, minor] => Some((Version::new(*major, *minor, 0), Precision::Minor)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfies(range: &str, version: &str) -> bool {
        RangeSet::parse(range)
            .unwrap()
            .satisfies(&Version::parse(version).unwrap())
    }

    #[test]
    fn test_exact_match() {
        assert!(satisfies("1.2.3", "1.2.3"));
        assert!(!satisfies("1.2.3", "1.2.4"));
        assert!(satisfies("=1.2.3", "1.2.3"));
        assert!(satisfies("v1.2.3", "1.2.3"));
    }

    #[test]
    fn test_caret_range() {
        assert!(satisfies("^1.2.3", "1.2.3"));
        assert!(satisfies("^1.2.3", "1.9.9"));
        assert!(!satisfies("^1.2.3", "1.2.2"));
        assert!(!satisfies("^1.2.3", "2.0.0"));
    }

    #[test]
    fn test_caret_zero_minor() {
        // ^0.2.3 -> >=0.2.3 <0.3.0
        assert!(satisfies("^0.2.3", "0.2.9"));
        assert!(!satisfies("^0.2.3", "0.3.0"));
        assert!(!satisfies("^0.2.3", "1.0.0"));
    }

    #[test]
    fn test_caret_zero_zero() {
        // ^0.0.3 -> >=0.0.3 <0.0.4
        assert!(satisfies("^0.0.3", "0.0.3"));
        assert!(!satisfies("^0.0.3", "0.0.4"));
    }

    #[test]
    fn test_caret_partial() {
        // ^1.2 -> >=1.2.0 <2.0.0, ^0 -> <1.0.0, ^0.0 -> <0.1.0
        assert!(satisfies("^1.2", "1.4.0"));
        assert!(!satisfies("^1.2", "2.0.0"));
        assert!(satisfies("^0", "0.9.1"));
        assert!(!satisfies("^0", "1.0.0"));
        assert!(satisfies("^0.0", "0.0.7"));
        assert!(!satisfies("^0.0", "0.1.0"));
    }

    #[test]
    fn test_tilde_range() {
        assert!(satisfies("~1.2.3", "1.2.9"));
        assert!(!satisfies("~1.2.3", "1.3.0"));
        assert!(!satisfies("~1.2.3", "1.2.2"));
    }

    #[test]
    fn test_tilde_partial_major_spans_minors() {
        // ~1 -> >=1.0.0 <2.0.0
        assert!(satisfies("~1", "1.9.0"));
        assert!(!satisfies("~1", "2.0.0"));
        // ~1.2 -> >=1.2.0 <1.3.0
        assert!(satisfies("~1.2", "1.2.5"));
        assert!(!satisfies("~1.2", "1.3.0"));
    }

    #[test]
    fn test_comparison_operators() {
        assert!(satisfies(">=1.0.0", "1.0.0"));
        assert!(!satisfies(">=1.0.0", "0.9.9"));
        assert!(satisfies(">1.0.0", "1.0.1"));
        assert!(!satisfies(">1.0.0", "1.0.0"));
        assert!(satisfies("<=1.0.0", "1.0.0"));
        assert!(!satisfies("<=1.0.0", "1.0.1"));
        assert!(satisfies("<1.0.0", "0.9.9"));
        assert!(!satisfies("<1.0.0", "1.0.0"));
    }

    #[test]
    fn test_partial_comparators_widen() {
        // >1.2 skips the entire 1.2.x span
        assert!(!satisfies(">1.2", "1.2.9"));
        assert!(satisfies(">1.2", "1.3.0"));
        // <=1.2 admits all of 1.2.x
        assert!(satisfies("<=1.2", "1.2.9"));
        assert!(!satisfies("<=1.2", "1.3.0"));
    }

    #[test]
    fn test_and_conjunction() {
        assert!(satisfies(">=1.2.0 <2.0.0", "1.5.0"));
        assert!(!satisfies(">=1.2.0 <2.0.0", "2.0.0"));
        assert!(!satisfies(">=1.2.0 <2.0.0", "1.1.0"));
    }

    #[test]
    fn test_or_union() {
        assert!(satisfies("^1.0.0 || ^2.0.0", "1.5.0"));
        assert!(satisfies("^1.0.0 || ^2.0.0", "2.3.0"));
        assert!(!satisfies("^1.0.0 || ^2.0.0", "3.0.0"));
    }

    #[test]
    fn test_hyphen_range() {
        assert!(satisfies("1.2.3 - 2.0.0", "1.2.3"));
        assert!(satisfies("1.2.3 - 2.0.0", "2.0.0"));
        assert!(!satisfies("1.2.3 - 2.0.0", "2.0.1"));
        assert!(!satisfies("1.2.3 - 2.0.0", "1.2.2"));
    }

    #[test]
    fn test_hyphen_range_partial_upper_widens() {
        // "1.2.3 - 2.3" means <2.4.0
        assert!(satisfies("1.2.3 - 2.3", "2.3.9"));
        assert!(!satisfies("1.2.3 - 2.3", "2.4.0"));
        // "1.2.3 - 2" means <3.0.0
        assert!(satisfies("1.2.3 - 2", "2.9.9"));
        assert!(!satisfies("1.2.3 - 2", "3.0.0"));
    }

    #[test]
    fn test_wildcards() {
        assert!(satisfies("*", "0.0.1"));
        assert!(satisfies("*", "99.0.0"));
        assert!(satisfies("1.x", "1.9.0"));
        assert!(!satisfies("1.x", "2.0.0"));
        assert!(satisfies("1.2.x", "1.2.7"));
        assert!(!satisfies("1.2.x", "1.3.0"));
        assert!(satisfies("1.2.*", "1.2.7"));
        assert!(satisfies("1.X", "1.3.0"));
    }

    #[test]
    fn test_bare_partials_span() {
        // "1" is 1.x, "1.2" is 1.2.x
        assert!(satisfies("1", "1.9.9"));
        assert!(!satisfies("1", "2.0.0"));
        assert!(satisfies("1.2", "1.2.9"));
        assert!(!satisfies("1.2", "1.3.0"));
        assert!(satisfies("=1.2", "1.2.9"));
    }

    #[test]
    fn test_empty_range_matches_everything() {
        assert!(satisfies("", "1.2.3"));
        assert!(satisfies("   ", "0.0.1"));
    }

    #[test]
    fn test_prerelease_excluded_by_default() {
        assert!(!satisfies("^1.0.0", "1.5.0-beta.1"));
        assert!(!satisfies("*", "2.0.0-rc.1"));
        assert!(!satisfies(">=1.0.0", "2.0.0-alpha"));
    }

    #[test]
    fn test_prerelease_gated_by_matching_anchor() {
        // Same triple as the anchor: admitted
        assert!(satisfies(">=1.2.3-alpha", "1.2.3-beta"));
        assert!(satisfies("1.2.3-beta.1", "1.2.3-beta.1"));
        // Different triple: still excluded
        assert!(!satisfies(">=1.2.3-alpha", "1.2.4-beta"));
    }

    #[test]
    fn test_unparseable_ranges() {
        assert!(RangeSet::parse("not-a-range").is_none());
        assert!(RangeSet::parse(">=").is_none());
        assert!(RangeSet::parse("^x.y.z").is_none());
        assert!(RangeSet::parse("1.2.3 - banana").is_none());
    }

    #[test]
    fn test_build_metadata_ignored() {
        assert!(satisfies("1.2.3", "1.2.3+build.5"));
        assert!(satisfies(">=1.2.3", "1.2.3+build.5"));
    }
}
