//! Memoized branch choice for repeated renders of the same page.

use std::sync::Arc;

use condlayout::{Branch, ConditionLayout};

use crate::{CategoryTree, PageContext, PageType};

/// What a cached choice depends on.
///
/// The tree is compared by `Arc` identity; the clone held here keeps the
/// allocation alive so a new tree can never reuse its address.
#[derive(Debug)]
struct Key {
    id: String,
    page_type: Option<PageType>,
    parent_category_id: Option<String>,
    tree: Option<Arc<CategoryTree>>,
}

impl Key {
    fn of(ctx: &PageContext) -> Self {
        Self {
            id: ctx.id.clone(),
            page_type: ctx.page_type.clone(),
            parent_category_id: ctx.parent_category_id.clone(),
            tree: ctx.tree.clone(),
        }
    }

    fn matches(&self, ctx: &PageContext) -> bool {
        let same_tree = match (&self.tree, &ctx.tree) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_tree
            && self.id == ctx.id
            && self.page_type == ctx.page_type
            && self.parent_category_id == ctx.parent_category_id
    }
}

/// A [`ConditionLayout`] that remembers its last choice.
///
/// Re-evaluates only when the page id, page type, parent id or tree
/// instance changes. Always returns what [`ConditionLayout::choose`] would.
#[derive(Debug)]
pub struct MemoizedChoice {
    layout: ConditionLayout<PageContext>,
    last: Option<(Key, Branch)>,
}

impl MemoizedChoice {
    /// Wrap a layout with an empty cache.
    #[must_use]
    pub fn new(layout: ConditionLayout<PageContext>) -> Self {
        Self { layout, last: None }
    }

    /// Pick a branch, reusing the cached one when the context is unchanged.
    pub fn choose(&mut self, ctx: &PageContext) -> Branch {
        if let Some((key, branch)) = &self.last {
            if key.matches(ctx) {
                return *branch;
            }
        }
        let branch = self.layout.choose(ctx);
        self.last = Some((Key::of(ctx), branch));
        branch
    }

    /// Drop the cached choice.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Returns `true` if a choice is cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.last.is_some()
    }

    /// The wrapped layout.
    #[must_use]
    pub fn layout(&self) -> &ConditionLayout<PageContext> {
        &self.layout
    }

    /// Unwrap the layout, dropping the cache.
    #[must_use]
    pub fn into_inner(self) -> ConditionLayout<PageContext> {
        self.layout
    }
}
