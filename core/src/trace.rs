//! Evaluation trace types for debugging layout decisions.
//!
//! - [`PredicateTrace`] mirrors [`Predicate`](crate::Predicate) but records results.
//! - [`LayoutTrace`] records the branch a [`ConditionLayout`](crate::ConditionLayout)
//!   chose and why.

use crate::{Branch, MatchType};

/// Trace of a predicate evaluation.
///
/// In And/Or, ALL children are evaluated (no short-circuit) so that every
/// condition is visible. The `matched` result is still correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateTrace {
    /// A single predicate evaluation.
    Single {
        /// Whether this predicate matched.
        matched: bool,
        /// Debug description of the `DataInput` (e.g., `"CategoryIdInput"`).
        input: String,
        /// The `MatchingData` extracted from context (Debug format).
        data: String,
        /// Debug description of the `InputMatcher`.
        matcher: String,
    },
    /// AND: all children must match.
    And {
        /// Whether all children matched.
        matched: bool,
        /// Trace of each child.
        children: Vec<PredicateTrace>,
    },
    /// OR: any child must match.
    Or {
        /// Whether any child matched.
        matched: bool,
        /// Trace of each child.
        children: Vec<PredicateTrace>,
    },
    /// NOT: inverts inner result.
    Not {
        /// Whether the NOT predicate matched (i.e., inner did NOT match).
        matched: bool,
        /// Trace of the inner predicate.
        inner: Box<PredicateTrace>,
    },
}

impl PredicateTrace {
    /// Get the overall match result of this predicate.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Single { matched, .. }
            | Self::And { matched, .. }
            | Self::Or { matched, .. }
            | Self::Not { matched, .. } => *matched,
        }
    }
}

/// Trace of a full [`ConditionLayout`](crate::ConditionLayout) evaluation.
///
/// `branch` always equals what [`ConditionLayout::choose`](crate::ConditionLayout::choose)
/// returns for the same context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTrace {
    /// The branch that was chosen.
    pub branch: Branch,
    /// The aggregation policy that was applied.
    pub match_type: MatchType,
    /// Trace of the aggregated predicate.
    pub predicate: PredicateTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(matched: bool) -> PredicateTrace {
        PredicateTrace::Single {
            matched,
            input: "CategoryIdInput".into(),
            data: "String(\"1\")".into(),
            matcher: "IdSetMatcher({\"1\"})".into(),
        }
    }

    #[test]
    fn matched_reads_each_variant() {
        assert!(single(true).matched());
        assert!(!PredicateTrace::And {
            matched: false,
            children: vec![single(false)],
        }
        .matched());
        assert!(PredicateTrace::Or {
            matched: true,
            children: vec![],
        }
        .matched());
        assert!(PredicateTrace::Not {
            matched: true,
            inner: Box::new(single(false)),
        }
        .matched());
    }

    #[test]
    fn layout_trace_debug_format() {
        let trace = LayoutTrace {
            branch: Branch::Then,
            match_type: MatchType::All,
            predicate: single(true),
        };
        let debug = format!("{trace:?}");
        assert!(debug.contains("Then"));
        assert!(debug.contains("CategoryIdInput"));
    }
}
