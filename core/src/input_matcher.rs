//! `InputMatcher`: Domain-agnostic value matching
//!
//! The `InputMatcher` trait matches against erased `MatchingData`. It is
//! **non-generic**, so one matcher value can be used with any context type.

use crate::MatchingData;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Matches against erased [`MatchingData`].
///
/// # Example
///
/// ```
/// use condlayout::{IdSetMatcher, InputMatcher, MatchingData};
///
/// let matcher = IdSetMatcher::new(["1", "2"]);
/// assert!(matcher.matches(&"2".into()));
/// assert!(!matcher.matches(&"3".into()));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `InputMatcher`",
    label = "this type cannot match against MatchingData",
    note = "implement `matches(&self, &MatchingData) -> bool` or use IdSetMatcher"
)]
pub trait InputMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    ///
    /// Returns `false` for `MatchingData::None` and for incompatible data.
    fn matches(&self, value: &MatchingData) -> bool;

    /// Returns the data types this matcher supports.
    ///
    /// Used for load-time validation. Default is `["string"]`.
    fn supported_types(&self) -> &[&'static str] {
        &["string"]
    }
}

#[diagnostic::do_not_recommend]
impl InputMatcher for Box<dyn InputMatcher> {
    fn matches(&self, value: &MatchingData) -> bool {
        (**self).matches(value)
    }

    fn supported_types(&self) -> &[&'static str] {
        (**self).supported_types()
    }
}

/// Normalizes an id for comparison.
///
/// Ids are compared as strings; surrounding whitespace is not significant.
///
/// ```
/// assert_eq!(condlayout::normalize_id(" 42 "), "42");
/// ```
#[inline]
#[must_use]
pub fn normalize_id(raw: &str) -> &str {
    raw.trim()
}

/// Set-membership matcher over ids.
///
/// Matches a `String` when its normalized form is in the set, and `Ids` when
/// any candidate is. Empty ids (after normalization) are dropped at
/// construction so a blank config entry never matches a blank page id.
#[derive(Clone, PartialEq, Eq)]
pub struct IdSetMatcher {
    ids: BTreeSet<String>,
}

impl IdSetMatcher {
    /// Create a matcher from the target ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|id| normalize_id(id.as_ref()).to_owned())
            .filter(|id| !id.is_empty())
            .collect();
        Self { ids }
    }

    /// Returns `true` if the given id (normalized) is in the set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(normalize_id(id))
    }

    /// Number of distinct target ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if there are no target ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the target ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Debug for IdSetMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IdSetMatcher").field(&self.ids).finish()
    }
}

impl InputMatcher for IdSetMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        value.candidates().any(|id| self.contains(id))
    }

    fn supported_types(&self) -> &[&'static str] {
        &["string", "ids"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_id() {
        let m = IdSetMatcher::new(["1", "2"]);
        assert!(m.matches(&"1".into()));
        assert!(!m.matches(&"3".into()));
    }

    #[test]
    fn matches_any_candidate() {
        let m = IdSetMatcher::new(["D1"]);
        let data = MatchingData::Ids(vec!["S1".into(), "C1".into(), "D1".into()]);
        assert!(m.matches(&data));

        let miss = MatchingData::Ids(vec!["S1".into(), "C1".into()]);
        assert!(!m.matches(&miss));
    }

    #[test]
    fn none_never_matches() {
        let m = IdSetMatcher::new(["1"]);
        assert!(!m.matches(&MatchingData::None));
    }

    #[test]
    fn normalizes_both_sides() {
        let m = IdSetMatcher::new([" 12 "]);
        assert!(m.contains("12"));
        assert!(m.matches(&"12 ".into()));
    }

    #[test]
    fn blank_ids_are_dropped() {
        let m = IdSetMatcher::new(["", "  ", "7"]);
        assert_eq!(m.len(), 1);
        assert!(!m.matches(&"".into()));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let m = IdSetMatcher::new(Vec::<String>::new());
        assert!(m.is_empty());
        assert!(!m.matches(&"1".into()));
    }

    #[test]
    fn case_sensitive() {
        let m = IdSetMatcher::new(["abc"]);
        assert!(!m.matches(&"ABC".into()));
    }

    #[test]
    fn debug_lists_ids() {
        let m = IdSetMatcher::new(["b", "a"]);
        assert_eq!(format!("{m:?}"), r#"IdSetMatcher({"a", "b"})"#);
    }

    #[test]
    fn supports_string_and_ids() {
        let m = IdSetMatcher::new(["1"]);
        assert_eq!(m.supported_types(), &["string", "ids"]);
    }
}
