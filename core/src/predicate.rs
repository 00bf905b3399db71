//! Predicate: Boolean expressions over `DataInputs`
//!
//! Predicates combine [`DataInput`] and [`InputMatcher`] into conditions that
//! compose with AND/OR/NOT.

use crate::{DataInput, InputMatcher, MatchingData, PredicateTrace};
use std::fmt::Debug;

/// A single predicate: a [`DataInput`] paired with an [`InputMatcher`].
///
/// # None → false
///
/// If the input returns [`MatchingData::None`], the predicate is `false`
/// without consulting the matcher.
pub struct SinglePredicate<Ctx> {
    input: Box<dyn DataInput<Ctx>>,
    matcher: Box<dyn InputMatcher>,
}

impl<Ctx> SinglePredicate<Ctx> {
    /// Create a new single predicate from a `DataInput` and `InputMatcher`.
    #[must_use]
    pub fn new(input: Box<dyn DataInput<Ctx>>, matcher: Box<dyn InputMatcher>) -> Self {
        Self { input, matcher }
    }

    /// Get a reference to the input.
    #[must_use]
    pub fn input(&self) -> &dyn DataInput<Ctx> {
        &*self.input
    }

    /// Get a reference to the matcher.
    #[must_use]
    pub fn matcher(&self) -> &dyn InputMatcher {
        &*self.matcher
    }

    /// Evaluate this predicate against the given context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        let data = self.input.get(ctx);
        match data {
            MatchingData::None => false,
            _ => self.matcher.matches(&data),
        }
    }

    /// Evaluate with full trace for debugging.
    #[must_use]
    pub fn evaluate_with_trace(&self, ctx: &Ctx) -> PredicateTrace {
        let data = self.input.get(ctx);
        let matched = match &data {
            MatchingData::None => false,
            _ => self.matcher.matches(&data),
        };
        PredicateTrace::Single {
            matched,
            input: format!("{:?}", self.input),
            data: format!("{data:?}"),
            matcher: format!("{:?}", self.matcher),
        }
    }
}

impl<Ctx> Debug for SinglePredicate<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinglePredicate")
            .field("input", &self.input)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Composite predicate with boolean logic.
///
/// `And` and `Or` short-circuit. An empty `And` is `true`, an empty `Or` is
/// `false`.
pub enum Predicate<Ctx> {
    /// A single predicate.
    Single(SinglePredicate<Ctx>),

    /// All predicates must match.
    And(Vec<Predicate<Ctx>>),

    /// Any predicate must match.
    Or(Vec<Predicate<Ctx>>),

    /// Inverts the inner predicate.
    Not(Box<Predicate<Ctx>>),
}

impl<Ctx> Predicate<Ctx> {
    /// Evaluate this predicate against the given context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        match self {
            Predicate::Single(p) => p.evaluate(ctx),
            Predicate::And(predicates) => predicates.iter().all(|p| p.evaluate(ctx)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.evaluate(ctx)),
            Predicate::Not(p) => !p.evaluate(ctx),
        }
    }

    /// Evaluate with full trace for debugging.
    ///
    /// Unlike [`evaluate()`](Self::evaluate), And/Or do NOT short-circuit here,
    /// so every condition shows up in the trace. `matched` is unaffected.
    #[must_use]
    pub fn evaluate_with_trace(&self, ctx: &Ctx) -> PredicateTrace {
        match self {
            Self::Single(p) => p.evaluate_with_trace(ctx),
            Self::And(predicates) => {
                let children: Vec<PredicateTrace> = predicates
                    .iter()
                    .map(|p| p.evaluate_with_trace(ctx))
                    .collect();
                let matched = children.iter().all(PredicateTrace::matched);
                PredicateTrace::And { matched, children }
            }
            Self::Or(predicates) => {
                let children: Vec<PredicateTrace> = predicates
                    .iter()
                    .map(|p| p.evaluate_with_trace(ctx))
                    .collect();
                let matched = children.iter().any(PredicateTrace::matched);
                PredicateTrace::Or { matched, children }
            }
            Self::Not(p) => {
                let inner = p.evaluate_with_trace(ctx);
                PredicateTrace::Not {
                    matched: !inner.matched(),
                    inner: Box::new(inner),
                }
            }
        }
    }

    /// Wraps this predicate in `Not` unless `expected` is `true`.
    ///
    /// Conditions carry an expected outcome (`toBe`); `false` means the
    /// condition holds when the check fails.
    #[must_use]
    pub fn expecting(self, expected: bool) -> Self {
        if expected {
            self
        } else {
            Self::Not(Box::new(self))
        }
    }

    /// Calculate the depth of this predicate tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Predicate::Single(_) => 1,
            Predicate::And(ps) | Predicate::Or(ps) => {
                1 + ps.iter().map(Predicate::depth).max().unwrap_or(0)
            }
            Predicate::Not(p) => 1 + p.depth(),
        }
    }
}

impl<Ctx> Debug for Predicate<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Single(p) => f.debug_tuple("Single").field(p).finish(),
            Predicate::And(ps) => f.debug_tuple("And").field(&ps.len()).finish(),
            Predicate::Or(ps) => f.debug_tuple("Or").field(&ps.len()).finish(),
            Predicate::Not(_) => f.debug_tuple("Not").finish(),
        }
    }
}
