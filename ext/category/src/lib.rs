//! condlayout-category: category conditions for storefront layouts
//!
//! Renders the `Then` branch of a layout only on selected category,
//! department or subcategory pages.
//!
//! # Architecture
//!
//! ```text
//! LayoutConfig { matchType, conditions: [{ subject, arguments: { ids }, toBe }] }
//!         ↓ registry(TreeStrategy).load_layout()
//! ConditionLayout<PageContext>
//!         ↓ choose(&PageContext)
//! Branch::Then | Branch::Else
//! ```
//!
//! | Subject | Page types | Candidate ids |
//! |---------|-----------|---------------|
//! | `category` | category | page id |
//! | `department` | department | page id |
//! | `categoryTree` | any typed page | page id and its ancestors in the [`CategoryTree`] |
//!
//! A condition holds when any candidate id is among its configured ids.
//! Missing page types, a missing tree and ids absent from the tree never
//! fail; they narrow matching down to the page's own id or to no match.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use condlayout::{Branch, LayoutConfig};
//! use condlayout_category::prelude::*;
//!
//! let tree = Arc::new(CategoryTree::new(vec![Department::new(
//!     "1",
//!     vec![Category::new("10", vec![Subcategory::new("100")])],
//! )]));
//!
//! let config: LayoutConfig = serde_json::from_str(
//!     r#"{ "conditions": [{ "subject": "categoryTree", "arguments": { "ids": [1] } }] }"#,
//! ).unwrap();
//! let layout = registry(TreeStrategy::Lineage).load_layout(config).unwrap();
//!
//! let page = PageContext::builder("100")
//!     .page_type(PageType::Subcategory)
//!     .tree(tree)
//!     .build();
//! assert_eq!(layout.choose(&page), Branch::Then);
//! ```

#![warn(missing_docs)]

mod context;
mod inputs;
mod keys;
mod memo;
mod tree;

pub use context::{PageContext, PageContextBuilder, PageType};
pub use inputs::{CategoryIdInput, CategoryLineageInput, DepartmentIdInput, ParentCategoryInput};
pub use keys::{
    register, register_with, registry, MatcherKey, TreeStrategy, UnknownMatcherKey,
    UnknownTreeStrategy,
};
pub use memo::MemoizedChoice;
pub use tree::{Category, CategoryTree, Department, Subcategory, SubcategoryLineage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        registry, Category, CategoryTree, Department, MatcherKey, MemoizedChoice, PageContext,
        PageType, Subcategory, TreeStrategy,
    };
}
