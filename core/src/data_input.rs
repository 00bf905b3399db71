//! `DataInput`: Domain-specific data extraction
//!
//! The `DataInput` trait pulls data out of a domain context (a storefront page,
//! a test map) and returns erased [`MatchingData`].

use crate::MatchingData;
use std::fmt::Debug;

/// Extracts data from a domain-specific context.
///
/// `DataInput` is the bridge between a domain context and the domain-agnostic
/// [`InputMatcher`](crate::InputMatcher). It decides whether it applies to the
/// context at all and, if so, which ids to hand to the matcher.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so compiled layouts can be shared.
///
/// # Example
///
/// ```
/// use condlayout::{DataInput, MatchingData};
///
/// #[derive(Debug)]
/// struct Page { id: String, kind: &'static str }
///
/// #[derive(Debug)]
/// struct BrandIdInput;
///
/// impl DataInput<Page> for BrandIdInput {
///     fn get(&self, ctx: &Page) -> MatchingData {
///         if ctx.kind == "brand" {
///             MatchingData::String(ctx.id.clone())
///         } else {
///             MatchingData::None
///         }
///     }
/// }
///
/// let page = Page { id: "2000001".into(), kind: "brand" };
/// assert_eq!(BrandIdInput.get(&page).as_str(), Some("2000001"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `DataInput<{Ctx}>`",
    label = "this type cannot extract data from `{Ctx}`",
    note = "DataInput<Ctx> extracts data from a specific context type"
)]
pub trait DataInput<Ctx>: Send + Sync + Debug {
    /// Extract data from the given context.
    ///
    /// Returns [`MatchingData::None`] when the input does not apply.
    /// A `None` always makes the surrounding predicate `false`.
    fn get(&self, ctx: &Ctx) -> MatchingData;

    /// Returns a static string describing the type of data this input produces.
    ///
    /// Checked against [`InputMatcher::supported_types`](crate::InputMatcher::supported_types)
    /// at load time.
    fn data_type(&self) -> &'static str {
        "string"
    }
}

#[diagnostic::do_not_recommend]
impl<Ctx> DataInput<Ctx> for Box<dyn DataInput<Ctx>> {
    fn get(&self, ctx: &Ctx) -> MatchingData {
        (**self).get(ctx)
    }

    fn data_type(&self) -> &'static str {
        (**self).data_type()
    }
}
