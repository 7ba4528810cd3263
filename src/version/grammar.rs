use std::cmp::Ordering;
use std::sync::LazyLock;

use super::Version;
use super::component::{Components, Tag, Word};

static FREEBSD: LazyLock<Grammar> = LazyLock::new(Grammar::default);

/// Token tables used to rank the alphabetic parts of a version.
///
/// Tokens are matched case-insensitively against a whole alphabetic run, so
/// `1.0rc1` carries the `rc` token while `1.0rcx` is an ordinary word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Tokens that sort below a plain release, lowest first.
    pub pre_release: Vec<String>,
    /// Tokens that sort above a plain release, lowest first.
    pub post_release: Vec<String>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            pre_release: ["alpha", "beta", "pre", "rc"].map(String::from).to_vec(),
            post_release: ["pl", "patch"].map(String::from).to_vec(),
        }
    }
}

impl Grammar {
    /// The grammar used by [`compare`](super::compare) and by the `Ord`
    /// implementation of [`Version`].
    pub fn freebsd() -> &'static Grammar {
        &FREEBSD
    }

    pub(crate) fn classify<'a>(&self, word: &'a str) -> Tag<'a> {
        let position = |tokens: &[String]| {
            tokens
                .iter()
                .position(|token| token.eq_ignore_ascii_case(word))
        };

        if let Some(rank) = position(&self.pre_release) {
            Tag::PreRelease(rank)
        } else if let Some(rank) = position(&self.post_release) {
            Tag::PostRelease(rank)
        } else {
            Tag::Word(Word::new(word))
        }
    }

    /// Compare two version strings. Never fails: malformed input still
    /// yields an ordering.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_versions(&Version::parse(a), &Version::parse(b))
    }

    pub fn compare_versions(&self, a: &Version<'_>, b: &Version<'_>) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        a.epoch()
            .cmp(&b.epoch())
            .then_with(|| self.compare_upstream(a.upstream(), b.upstream()))
            .then_with(|| a.revision().cmp(&b.revision()))
    }

    fn compare_upstream(&self, a: &str, b: &str) -> Ordering {
        let mut lhs = Components::new(a, self);
        let mut rhs = Components::new(b, self);

        loop {
            let (l, r) = match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (l, r) => (l.unwrap_or_default(), r.unwrap_or_default()),
            };
            let ordering = l.cmp(&r);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
    }
}
