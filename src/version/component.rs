//! Tokenizer for the upstream part of a version string.
//!
//! The upstream version is read as a sequence of components. Each component
//! is a `number`, an optional alphabetic `tag` and an optional trailing
//! `patch` number, e.g. `10a1` or `0beta2`. Any character that is not an
//! ASCII letter or digit separates components, and consecutive separators
//! collapse (`1..2` reads like `1.2`).

use std::cmp::Ordering;

use super::grammar::Grammar;

/// A run of decimal digits compared as an unsigned integer of any length.
///
/// Leading zeros are dropped on construction so `"007"` equals `"7"`, and an
/// empty run is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric<'a>(&'a str);

impl<'a> Numeric<'a> {
    /// Build from a string made only of ASCII digits.
    pub(crate) fn from_digits(digits: &'a str) -> Self {
        Numeric(digits.trim_start_matches('0'))
    }

    /// Parse the leading digits of `text`, ignoring anything after them.
    /// Text without leading digits is zero.
    pub fn leading(text: &'a str) -> Self {
        let end = text
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(text.len());
        Self::from_digits(&text[..end])
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Significant digits, without leading zeros. Empty for zero.
    pub fn digits(&self) -> &'a str {
        self.0
    }
}

impl Ord for Numeric<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Numeric<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Numeric<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Numeric<'_> {}

/// An alphabetic run that is not a grammar token, compared character by
/// character. Only the tokens themselves ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Word<'a>(&'a str);

impl<'a> Word<'a> {
    pub(crate) fn new(word: &'a str) -> Self {
        Word(word)
    }
}

/// Classification of the alphabetic part of a component.
///
/// Variant order is the ranking: every pre-release token sorts below a plain
/// release, which sorts below post-release tokens, which sort below any
/// other word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag<'a> {
    /// Index into [`Grammar::pre_release`].
    PreRelease(usize),
    #[default]
    Release,
    /// Index into [`Grammar::post_release`].
    PostRelease(usize),
    Word(Word<'a>),
}

/// One `number tag patch` triple. The derived ordering compares the fields
/// in declaration order.
///
/// `Component::default()` stands in for a component that one side lacks:
/// zero, no tag, zero patch. So `1.0 == 1.0.0` while `1.0 < 1.0.1`, and a
/// missing patch equals an explicit `0` (`1.0a == 1.0a0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Component<'a> {
    pub number: Numeric<'a>,
    pub tag: Tag<'a>,
    pub patch: Numeric<'a>,
}

/// Iterator over the components of an upstream version.
pub struct Components<'a, 'g> {
    rest: &'a str,
    grammar: &'g Grammar,
}

impl<'a, 'g> Components<'a, 'g> {
    pub fn new(upstream: &'a str, grammar: &'g Grammar) -> Self {
        Self {
            rest: upstream,
            grammar,
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let end = self
            .rest
            .bytes()
            .position(|b| !pred(b))
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        run
    }
}

impl<'a> Iterator for Components<'a, '_> {
    type Item = Component<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Runs end on an ASCII byte or on the first byte of a multi-byte
        // char, so every split lands on a char boundary.
        self.take_while(|b| !b.is_ascii_alphanumeric());
        if self.rest.is_empty() {
            return None;
        }

        let number = Numeric::from_digits(self.take_while(|b| b.is_ascii_digit()));

        let word = self.take_while(|b| b.is_ascii_alphabetic());
        if word.is_empty() {
            return Some(Component {
                number,
                ..Component::default()
            });
        }

        let tag = self.grammar.classify(word);
        let patch = Numeric::from_digits(self.take_while(|b| b.is_ascii_digit()));

        Some(Component { number, tag, patch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(upstream: &str) -> Vec<Component<'_>> {
        Components::new(upstream, Grammar::freebsd()).collect()
    }

    #[test]
    fn test_numeric_ignores_leading_zeros() {
        assert_eq!(Numeric::from_digits("007"), Numeric::from_digits("7"));
        assert_eq!(Numeric::from_digits("000"), Numeric::default());
        assert!(Numeric::from_digits("10") > Numeric::from_digits("9"));
    }

    #[test]
    fn test_numeric_compares_beyond_u64() {
        let huge = Numeric::from_digits("184467440737095516160");
        let small = Numeric::from_digits("18446744073709551615");
        assert!(huge > small);
    }

    #[test]
    fn test_numeric_leading_stops_at_non_digit() {
        assert_eq!(Numeric::leading("12abc").digits(), "12");
        assert!(Numeric::leading("abc").is_zero());
        assert!(Numeric::leading("").is_zero());
    }

    #[test]
    fn test_components_split_on_dots() {
        let parts = components("1.20.3");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].number.digits(), "20");
        assert_eq!(parts[2].tag, Tag::Release);
    }

    #[test]
    fn test_components_collapse_separators() {
        assert_eq!(components("1..2"), components("1.2"));
        assert_eq!(components("1.0:2003.09"), components("1.0.2003.9"));
    }

    #[test]
    fn test_component_with_tag_and_patch() {
        let parts = components("1.0beta2");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].tag, Tag::PreRelease(1));
        assert_eq!(parts[1].patch, Numeric::from_digits("2"));
    }

    #[test]
    fn test_component_inserts_missing_separator() {
        // letter number letter reads as two components
        let parts = components("10a1b2");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].number.digits(), "10");
        assert!(parts[1].number.is_zero());
    }

    #[test]
    fn test_word_compares_by_character() {
        assert!(Word("ABC") < Word("abc"));
        assert!(Word("abd") > Word("abc"));
        assert!(Word("ab") < Word("abc"));
    }

    #[test]
    fn test_missing_patch_is_zero() {
        assert_eq!(components("1.0a"), components("1.0a0"));
        assert_eq!(components("1.0rc"), components("1.0rc00"));
        assert!(components("1.0a") < components("1.0a1"));
    }

    #[test]
    fn test_non_ascii_is_a_separator() {
        let parts = components("1é2");
        assert_eq!(parts.len(), 2);
    }
}
