//! `MatchingData`: Erased data that flows between `DataInput` and `InputMatcher`
//!
//! Inputs produce `MatchingData`, matchers consume it. Keeping the data erased
//! lets one matcher type serve every context type.

/// The erased data type that flows between `DataInput` and `InputMatcher`.
///
/// # Variants
///
/// - `None`: The input does not apply to this context (wrong page type, no data)
/// - `String`: A single id
/// - `Ids`: Candidate ids; a matcher succeeds when any of them matches
///
/// # Example
///
/// ```
/// use condlayout::MatchingData;
///
/// let data = MatchingData::Ids(vec!["S1".into(), "C1".into(), "D1".into()]);
/// assert_eq!(data.candidates().count(), 3);
/// assert!(MatchingData::None.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingData {
    /// No data available.
    /// When a predicate receives this, it evaluates to `false`.
    None,

    /// A single id.
    String(String),

    /// Candidate ids, typically a page id followed by its ancestors.
    Ids(Vec<String>),
}

impl MatchingData {
    /// Returns `true` if this is the `None` variant.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the inner string if this is the `String` variant.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner ids if this is the `Ids` variant.
    #[inline]
    #[must_use]
    pub fn as_ids(&self) -> Option<&[String]> {
        match self {
            Self::Ids(ids) => Some(ids),
            _ => None,
        }
    }

    /// Iterates every candidate id carried by this value.
    ///
    /// `None` yields nothing, `String` yields one item.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::None => &[],
            Self::String(s) => std::slice::from_ref(s),
            Self::Ids(ids) => ids,
        };
        slice.iter().map(String::as_str)
    }

    /// Returns a static string describing the data type.
    ///
    /// Matches the names returned by [`DataInput::data_type`](crate::DataInput::data_type).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::Ids(_) => "ids",
        }
    }
}

impl From<&str> for MatchingData {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for MatchingData {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for MatchingData {
    fn from(ids: Vec<String>) -> Self {
        Self::Ids(ids)
    }
}

impl<T: Into<MatchingData>> From<Option<T>> for MatchingData {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}
