//! The page being rendered, as seen by category conditions.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use condlayout::normalize_id;
use serde::Deserialize;

use crate::CategoryTree;

/// Kind of page the context describes.
///
/// Parsed case-sensitively. Strings other than `category`, `department` and
/// `subcategory` are kept as [`PageType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PageType {
    /// A category page.
    Category,
    /// A department page.
    Department,
    /// A subcategory page.
    Subcategory,
    /// Any other page kind, spelled as reported.
    Other(String),
}

impl PageType {
    /// The spelling this type was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Category => "category",
            Self::Department => "department",
            Self::Subcategory => "subcategory",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for PageType {
    fn from(s: &str) -> Self {
        match s {
            "category" => Self::Category,
            "department" => Self::Department,
            "subcategory" => Self::Subcategory,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PageType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl FromStr for PageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation context for category conditions.
///
/// `page_type` is `None` when the upstream query did not report one. `tree`
/// is `None` while the tree is still loading or unavailable; lookups then
/// miss and matching degrades to the page's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Page id, normalized.
    pub id: String,
    /// Page kind.
    pub page_type: Option<PageType>,
    /// Direct parent id, normalized. Only the parent-id tree strategy reads it.
    pub parent_category_id: Option<String>,
    /// Shared category tree.
    pub tree: Option<Arc<CategoryTree>>,
}

impl PageContext {
    /// Context with an id and a page type, no parent and no tree.
    pub fn new(id: impl AsRef<str>, page_type: PageType) -> Self {
        Self::builder(id).page_type(page_type).build()
    }

    /// Start building a context for page `id`.
    pub fn builder(id: impl AsRef<str>) -> PageContextBuilder {
        PageContextBuilder {
            context: Self {
                id: normalize_id(id.as_ref()).to_owned(),
                page_type: None,
                parent_category_id: None,
                tree: None,
            },
        }
    }

    /// The tree, if loaded.
    #[must_use]
    pub fn tree(&self) -> Option<&CategoryTree> {
        self.tree.as_deref()
    }

    /// Returns `true` if the page type is `page_type`.
    #[must_use]
    pub fn is(&self, page_type: &PageType) -> bool {
        self.page_type.as_ref() == Some(page_type)
    }
}

/// Builder for [`PageContext`].
#[derive(Debug, Clone)]
#[must_use]
pub struct PageContextBuilder {
    context: PageContext,
}

impl PageContextBuilder {
    /// Set the page type.
    pub fn page_type(mut self, page_type: impl Into<PageType>) -> Self {
        self.context.page_type = Some(page_type.into());
        self
    }

    /// Set the direct parent id, normalized.
    pub fn parent_category_id(mut self, id: impl AsRef<str>) -> Self {
        self.context.parent_category_id = Some(normalize_id(id.as_ref()).to_owned());
        self
    }

    /// Attach a loaded tree.
    pub fn tree(mut self, tree: Arc<CategoryTree>) -> Self {
        self.context.tree = Some(tree);
        self
    }

    /// Set or clear the tree.
    pub fn maybe_tree(mut self, tree: Option<Arc<CategoryTree>>) -> Self {
        self.context.tree = tree;
        self
    }

    /// Finish the context.
    pub fn build(self) -> PageContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_type_parses_case_sensitively() {
        assert_eq!(PageType::from("category"), PageType::Category);
        assert_eq!(PageType::from("department"), PageType::Department);
        assert_eq!(PageType::from("subcategory"), PageType::Subcategory);
        assert_eq!(PageType::from("Category"), PageType::Other("Category".into()));
        assert_eq!("brand".parse::<PageType>(), Ok(PageType::Other("brand".into())));
    }

    #[test]
    fn page_type_display_round_trips_spelling() {
        for s in ["category", "department", "subcategory", "brand"] {
            assert_eq!(PageType::from(s).to_string(), s);
        }
    }

    #[test]
    fn page_type_deserializes_from_string() {
        let t: PageType = serde_json::from_str("\"subcategory\"").unwrap();
        assert_eq!(t, PageType::Subcategory);
        let t: PageType = serde_json::from_str("\"search\"").unwrap();
        assert_eq!(t, PageType::Other("search".into()));
    }

    #[test]
    fn builder_normalizes_ids() {
        let ctx = PageContext::builder(" 12 ")
            .page_type(PageType::Category)
            .parent_category_id(" 3")
            .build();
        assert_eq!(ctx.id, "12");
        assert_eq!(ctx.parent_category_id.as_deref(), Some("3"));
        assert!(ctx.is(&PageType::Category));
        assert!(ctx.tree().is_none());
    }

    #[test]
    fn builder_defaults_to_absent_fields() {
        let ctx = PageContext::builder("1").build();
        assert!(ctx.page_type.is_none());
        assert!(ctx.parent_category_id.is_none());
        assert!(!ctx.is(&PageType::Department));
    }

    #[test]
    fn tree_is_shared() {
        let tree = Arc::new(CategoryTree::default());
        let a = PageContext::builder("1").tree(Arc::clone(&tree)).build();
        let b = PageContext::builder("2").maybe_tree(Some(Arc::clone(&tree))).build();
        assert!(Arc::ptr_eq(a.tree.as_ref().unwrap(), b.tree.as_ref().unwrap()));
    }
}
