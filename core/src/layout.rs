//! `ConditionLayout`: Aggregates conditions and picks a branch
//!
//! A layout owns one predicate per condition and a [`MatchType`] that decides
//! how their results combine. Evaluation yields [`Branch::Then`] when the
//! combined predicate holds and [`Branch::Else`] otherwise.

use crate::{LayoutTrace, MatcherError, Predicate, MAX_DEPTH};
use std::fmt;
use std::str::FromStr;

/// Which of the two externally supplied children to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Branch {
    /// The conditions held.
    Then,
    /// The conditions did not hold.
    Else,
}

impl From<bool> for Branch {
    fn from(matched: bool) -> Self {
        if matched {
            Self::Then
        } else {
            Self::Else
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Then => "then",
            Self::Else => "else",
        })
    }
}

/// How condition results combine.
///
/// | Policy | Holds when | Empty list |
/// |--------|------------|------------|
/// | `All` | every condition holds | `Then` |
/// | `Any` | at least one holds | `Else` |
/// | `None` | no condition holds | `Then` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchType {
    /// Every condition must hold.
    #[default]
    All,
    /// At least one condition must hold.
    Any,
    /// No condition may hold.
    None,
}

impl MatchType {
    /// The config spelling of this policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::None => "none",
        }
    }

    /// Combine per-condition predicates under this policy.
    #[must_use]
    pub fn combine<Ctx>(self, conditions: Vec<Predicate<Ctx>>) -> Predicate<Ctx> {
        match self {
            Self::All => Predicate::And(conditions),
            Self::Any => Predicate::Or(conditions),
            Self::None => Predicate::Not(Box::new(Predicate::Or(conditions))),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised match type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match type \"{0}\", expected one of: all, any, none")]
pub struct UnknownMatchType(pub String);

impl FromStr for MatchType {
    type Err = UnknownMatchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "any" => Ok(Self::Any),
            "none" => Ok(Self::None),
            other => Err(UnknownMatchType(other.to_owned())),
        }
    }
}

/// A compiled conditional layout.
///
/// Stateless: `choose` is a pure function of the context, so calling it
/// twice with the same context yields the same branch.
///
/// # Example
///
/// ```ignore
/// let layout = registry.load_layout(config)?;
/// match layout.choose(&page) {
///     Branch::Then => render_then(),
///     Branch::Else => render_else(),
/// }
/// ```
pub struct ConditionLayout<Ctx> {
    predicate: Predicate<Ctx>,
    match_type: MatchType,
    condition_count: usize,
}

impl<Ctx> ConditionLayout<Ctx> {
    /// Build a layout from per-condition predicates.
    #[must_use]
    pub fn new(conditions: Vec<Predicate<Ctx>>, match_type: MatchType) -> Self {
        let condition_count = conditions.len();
        Self {
            predicate: match_type.combine(conditions),
            match_type,
            condition_count,
        }
    }

    /// Evaluate the conditions and pick a branch.
    pub fn choose(&self, ctx: &Ctx) -> Branch {
        let branch = Branch::from(self.predicate.evaluate(ctx));
        tracing::debug!(
            %branch,
            match_type = %self.match_type,
            conditions = self.condition_count,
            "layout branch chosen"
        );
        branch
    }

    /// Evaluate with a full trace of every condition.
    ///
    /// The returned `branch` is identical to [`choose`](Self::choose).
    #[must_use]
    pub fn choose_with_trace(&self, ctx: &Ctx) -> LayoutTrace {
        let predicate = self.predicate.evaluate_with_trace(ctx);
        LayoutTrace {
            branch: Branch::from(predicate.matched()),
            match_type: self.match_type,
            predicate,
        }
    }

    /// The aggregation policy.
    #[must_use]
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.condition_count
    }

    /// Returns `true` if the layout has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.condition_count == 0
    }

    /// Depth of the compiled predicate, counting the layout itself.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.predicate.depth()
    }

    /// Validate this layout against [`MAX_DEPTH`].
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::DepthExceeded`] if nesting is too deep.
    pub fn validate(&self) -> Result<(), MatcherError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(MatcherError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}

impl<Ctx> fmt::Debug for ConditionLayout<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionLayout")
            .field("match_type", &self.match_type)
            .field("conditions", &self.condition_count)
            .finish()
    }
}
