//! FreeBSD package version ordering.
//!
//! A version string has the shape `upstream[_revision][,epoch]`. The three
//! parts are compared independently: epoch first, then the upstream version
//! component by component, then the port revision. The comparison is total:
//! unparseable epochs and revisions count as zero and any string, including
//! the empty one, has a place in the order.
//!
//! ```
//! use std::cmp::Ordering;
//! use pkgtool::version::compare;
//!
//! assert_eq!(compare("1.0.alpha1", "1.0"), Ordering::Less);
//! assert_eq!(compare("1.0_1", "1.0"), Ordering::Greater);
//! assert_eq!(compare("0.9,1", "2.0"), Ordering::Greater);
//! ```

mod component;
mod grammar;

use std::cmp::Ordering;
use std::fmt;

pub use component::Numeric;
pub use grammar::Grammar;

/// Compare two version strings with the default FreeBSD grammar.
pub fn compare(a: &str, b: &str) -> Ordering {
    Grammar::freebsd().compare(a, b)
}

/// Returns true if `candidate` is strictly newer than `current`.
pub fn is_newer(current: &str, candidate: &str) -> bool {
    compare(candidate, current) == Ordering::Greater
}

/// A version string split into its epoch, upstream and revision parts.
///
/// Borrows from the input; parsing never fails. `Ord` uses
/// [`Grammar::freebsd`].
#[derive(Debug, Clone, Copy)]
pub struct Version<'a> {
    raw: &'a str,
    upstream: &'a str,
    epoch: Option<&'a str>,
    revision: Option<&'a str>,
}

impl<'a> Version<'a> {
    /// Split `raw` on the last `_` (revision) and the last `,` (epoch).
    ///
    /// Either order is accepted: `1.3_2,1` and `1.3,1_2` both read as
    /// upstream `1.3`, revision `2`, epoch `1`. The upstream part ends at
    /// whichever delimiter comes first.
    pub fn parse(raw: &'a str) -> Self {
        let underscore = raw.rfind('_');
        let comma = raw.rfind(',');

        // a segment runs until the other delimiter when that one follows it
        let segment = |start: usize, other: Option<usize>| {
            let end = other.filter(|&o| o > start).unwrap_or(raw.len());
            &raw[start + 1..end]
        };

        let revision = underscore.map(|u| segment(u, comma));
        let epoch = comma.map(|c| segment(c, underscore));

        let upstream_end = match (underscore, comma) {
            (Some(u), Some(c)) => u.min(c),
            (Some(d), None) | (None, Some(d)) => d,
            (None, None) => raw.len(),
        };

        Self {
            raw,
            upstream: &raw[..upstream_end],
            epoch,
            revision,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn upstream(&self) -> &'a str {
        self.upstream
    }

    /// The epoch text as written, if the version has one.
    pub fn epoch_str(&self) -> Option<&'a str> {
        self.epoch
    }

    /// The port revision text as written, if the version has one.
    pub fn revision_str(&self) -> Option<&'a str> {
        self.revision
    }

    /// Numeric epoch; missing or malformed is zero.
    pub fn epoch(&self) -> Numeric<'a> {
        self.epoch.map(Numeric::leading).unwrap_or_default()
    }

    /// Numeric port revision; missing or malformed is zero.
    pub fn revision(&self) -> Numeric<'a> {
        self.revision.map(Numeric::leading).unwrap_or_default()
    }
}

impl fmt::Display for Version<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

impl Ord for Version<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        Grammar::freebsd().compare_versions(self, other)
    }
}

impl PartialOrd for Version<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use Ordering::{Equal, Greater, Less};

    const SAMPLES: &[&str] = &[
        "",
        "0",
        "1",
        "1.0",
        "1.0.0",
        "1.0.1",
        "1.0alpha1",
        "1.0beta1",
        "1.0pre1",
        "1.0rc1",
        "1.0pl1",
        "1.0a",
        "1.0.a1",
        "1.0A",
        "1.0a0",
        "1.0rc",
        "1.09",
        "1.9",
        "1.10",
        "1.0_1",
        "1.0_0",
        "1.0,1",
        "1.0_1,1",
        "1.0,1_2",
        "2.1.alpha1",
        "2.1.beta2",
        "2.1.pl1",
        "abc",
        "_",
        ",",
        ",x_y",
        "1..2",
        "1.0:20030916",
        "99999999999999999999999.1",
        "+",
        "1.0+3",
    ];

    #[test]
    fn test_parse_plain_version() {
        let v = Version::parse("1.2.3");
        assert_eq!(v.upstream(), "1.2.3");
        assert_eq!(v.epoch_str(), None);
        assert_eq!(v.revision_str(), None);
        assert!(v.epoch().is_zero());
    }

    #[test]
    fn test_parse_ports_order() {
        let v = Version::parse("1.3_2,1");
        assert_eq!(v.upstream(), "1.3");
        assert_eq!(v.revision_str(), Some("2"));
        assert_eq!(v.epoch_str(), Some("1"));
    }

    #[test]
    fn test_parse_epoch_before_revision() {
        let v = Version::parse("1.3,1_2");
        assert_eq!(v.upstream(), "1.3");
        assert_eq!(v.revision_str(), Some("2"));
        assert_eq!(v.epoch_str(), Some("1"));
    }

    #[test]
    fn test_parse_malformed_segments_are_zero() {
        let v = Version::parse("1.0,x_y");
        assert!(v.epoch().is_zero());
        assert!(v.revision().is_zero());
        assert_eq!(compare("1.0,x_y", "1.0"), Equal);
    }

    #[test]
    fn test_compare_is_total_and_antisymmetric() {
        for a in SAMPLES {
            assert_eq!(compare(a, a), Equal, "reflexive for {a:?}");
            for b in SAMPLES {
                assert_eq!(
                    compare(a, b),
                    compare(b, a).reverse(),
                    "antisymmetric for {a:?} {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_compare_is_transitive() {
        for a in SAMPLES {
            for b in SAMPLES {
                for c in SAMPLES {
                    let (ab, bc) = (compare(a, b), compare(b, c));
                    if ab == bc {
                        assert_eq!(compare(a, c), ab, "transitive for {a:?} {b:?} {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_versions() {
        assert_eq!(compare("", ""), Equal);
        assert_eq!(compare("", "0"), Less);
        assert_eq!(compare("alpha", ""), Greater);
        assert_eq!(compare("_", ""), Greater);
    }

    #[test]
    fn test_epoch_dominates() {
        assert_eq!(compare("1.0,1_0", "99.0,0_0"), Greater);
        assert_eq!(compare("1.0_0,1", "99.0_0,0"), Greater);
        assert_eq!(compare("0.1,2", "0.1,10"), Less);
    }

    #[test]
    fn test_pre_release_ordering() {
        assert_eq!(compare("2.1.alpha1", "2.1"), Less);
        assert_eq!(compare("2.1", "2.1.pl1"), Less);
        assert_eq!(compare("2.1.beta2", "2.1.alpha5"), Greater);
    }

    #[test]
    fn test_pre_release_tokens_chain() {
        let chain = [
            "1.0alpha1",
            "1.0beta1",
            "1.0pre1",
            "1.0rc1",
            "1.0",
            "1.0pl1",
        ];
        for pair in chain.windows(2) {
            assert_eq!(compare(pair[0], pair[1]), Less, "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_pre_release_tokens_ignore_case() {
        assert_eq!(compare("1.0RC1", "1.0rc1"), Equal);
        assert_eq!(compare("1.0BETA1", "1.0"), Less);
    }

    #[test]
    fn test_words_compare_by_character() {
        assert_eq!(compare("1.0A", "1.0a"), Less);
        assert_eq!(compare("1.0b", "1.0B"), Greater);
        assert_eq!(compare("1.0abc", "1.0abc"), Equal);
    }

    #[test]
    fn test_missing_patch_equals_zero() {
        assert_eq!(compare("1.0a", "1.0a0"), Equal);
        assert_eq!(compare("1.0rc", "1.0rc0"), Equal);
        assert_eq!(compare("1.0pl", "1.0pl1"), Less);
    }

    #[test]
    fn test_letter_suffix_is_newer() {
        assert_eq!(compare("1.0.2a", "1.0.2"), Greater);
        assert_eq!(compare("1.0.2b", "1.0.2a"), Greater);
        assert_eq!(compare("1.0.2a", "1.0.3"), Less);
    }

    #[test]
    fn test_revision_tie_break() {
        assert_eq!(compare("1.0_1", "1.0_2"), Less);
        assert_eq!(compare("1.0_0", "1.0"), Equal);
        assert_eq!(compare("1.1", "1.0_9"), Greater);
    }

    #[test]
    fn test_numeric_runs_ignore_leading_zeros() {
        assert_eq!(compare("1.09", "1.9"), Equal);
        assert_eq!(compare("1.10", "1.9"), Greater);
    }

    #[test]
    fn test_trailing_components() {
        assert_eq!(compare("1.0", "1.0.1"), Less);
        assert_eq!(compare("1.0", "1.0.0"), Equal);
        assert_eq!(compare("1", "1.0.0.0"), Equal);
    }

    #[test]
    fn test_sample_scenario_ordering() {
        assert_eq!(compare("1.2_1", "1.2.1"), Less);
        assert_eq!(compare("1.3,1_0", "1.2.1"), Greater);
        assert_eq!(compare("1.3,1_0", "1.2_1"), Greater);
    }

    #[test]
    fn test_version_ord_sorts() {
        let mut versions: Vec<Version> = ["1.10", "1.0alpha1", "1.9", "0.1,1", "1.0"]
            .into_iter()
            .map(Version::parse)
            .collect();
        versions.sort();
        let sorted: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(sorted, ["1.0alpha1", "1.0", "1.9", "1.10", "0.1,1"]);
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("1.0", "1.0_1"));
        assert!(!is_newer("1.0_1", "1.0_1"));
        assert!(!is_newer("2.0", "1.0"));
    }
}
