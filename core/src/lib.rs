//! condlayout - condition engine for storefront layouts
//!
//! Decides between a `Then` and an `Else` branch of a layout by evaluating a
//! list of conditions against the current page context.
//!
//! # Architecture
//!
//! The pipeline mirrors a classic extractor/matcher split:
//!
//! - [`MatchingData`]: Erased data (no data, a single id, or a list of candidate ids)
//! - [`DataInput<Ctx>`]: Domain-specific extraction, returns `MatchingData`
//! - [`InputMatcher`]: Domain-agnostic matching (non-generic, shareable)
//! - [`SinglePredicate<Ctx>`]: Combines `DataInput` + `InputMatcher`
//! - [`Predicate<Ctx>`]: Boolean composition (And, Or, Not)
//! - [`ConditionLayout<Ctx>`]: Aggregates conditions under a [`MatchType`] and picks a [`Branch`]
//!
//! # Key invariants
//!
//! 1. **`DataInput` None → false**: when an input does not apply to the context
//!    (wrong page type, missing data) it returns [`MatchingData::None`] and the
//!    predicate evaluates to `false`. Evaluation never fails.
//!
//! 2. **Ids compare as normalized strings**: [`IdSetMatcher`] trims ids on both
//!    sides; config loaders stringify numeric ids before they reach it.
//!
//! # Example
//!
//! ```
//! use condlayout::prelude::*;
//!
//! #[derive(Debug)]
//! struct Page { id: String }
//!
//! #[derive(Debug, Default)]
//! struct PageIdInput;
//!
//! impl DataInput<Page> for PageIdInput {
//!     fn get(&self, ctx: &Page) -> MatchingData {
//!         MatchingData::String(ctx.id.clone())
//!     }
//! }
//!
//! let layout = ConditionLayout::new(
//!     vec![Predicate::Single(SinglePredicate::new(
//!         Box::new(PageIdInput),
//!         Box::new(IdSetMatcher::new(["12", "34"])),
//!     ))],
//!     MatchType::All,
//! );
//!
//! assert_eq!(layout.choose(&Page { id: "34".into() }), Branch::Then);
//! assert_eq!(layout.choose(&Page { id: "56".into() }), Branch::Else);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod data_input;
mod input_matcher;
mod layout;
mod matching_data;
mod predicate;
mod trace;

#[cfg(feature = "registry")]
mod config;
#[cfg(feature = "registry")]
mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use data_input::DataInput;
pub use input_matcher::{normalize_id, IdSetMatcher, InputMatcher};
pub use layout::{Branch, ConditionLayout, MatchType, UnknownMatchType};
pub use matching_data::MatchingData;
pub use predicate::{Predicate, SinglePredicate};
pub use trace::{LayoutTrace, PredicateTrace};

#[cfg(feature = "registry")]
pub use config::{deserialize_id, ArgumentsConfig, ConditionConfig, IdValue, LayoutConfig};
#[cfg(feature = "registry")]
pub use registry::{Registry, RegistryBuilder};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use condlayout::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Branch, ConditionLayout, DataInput, IdSetMatcher, InputMatcher, LayoutTrace, MatchType,
        MatcherError, MatchingData, Predicate, PredicateTrace, SinglePredicate,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth of a compiled layout predicate.
///
/// Validate at config load time via [`ConditionLayout::validate`].
pub const MAX_DEPTH: usize = 32;

/// Maximum number of conditions in a single layout.
pub const MAX_CONDITIONS: usize = 256;

/// Maximum number of ids in the arguments of a single condition.
pub const MAX_IDS_PER_CONDITION: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from layout construction and validation.
///
/// These surface at config load time, never during evaluation.
/// Fix the configuration and load the layout again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// Predicate nesting exceeds [`MAX_DEPTH`].
    #[error("layout nesting depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Actual depth of the layout predicate.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// A condition names a subject that is not registered.
    #[error("unknown condition subject \"{subject}\"; {}", describe_available(.available))]
    UnknownSubject {
        /// The unregistered subject.
        subject: String,
        /// Subjects that ARE registered, sorted.
        available: Vec<String>,
    },

    /// Input data type is incompatible with the matcher's supported types.
    #[error("input produces \"{input_type}\" data but matcher supports {matcher_types:?}")]
    IncompatibleTypes {
        /// The data type produced by the input.
        input_type: String,
        /// The data types accepted by the matcher.
        matcher_types: Vec<String>,
    },

    /// Too many conditions in a single layout.
    #[error("layout has {count} conditions, but maximum allowed is {max}")]
    TooManyConditions {
        /// Actual count of conditions.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Too many ids in the arguments of one condition.
    #[error("condition \"{subject}\" lists {count} ids, but maximum allowed is {max}")]
    TooManyIds {
        /// Subject of the offending condition.
        subject: String,
        /// Actual count of ids.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
}

fn describe_available(available: &[String]) -> String {
    if available.is_empty() {
        "no subjects are registered".to_owned()
    } else {
        format!("registered: {}", available.join(", "))
    }
}
