//! `DataInput` implementations for [`PageContext`].
//!
//! Each input returns [`MatchingData::None`] when its key does not apply to
//! the page, so the condition is false regardless of its ids.

use condlayout::{DataInput, MatchingData};

use crate::{PageContext, PageType};

/// `category`: the page id of a category page.
///
/// Blank ids are treated as absent: a blank page id never matches, not even
/// a blank configured id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryIdInput;

impl DataInput<PageContext> for CategoryIdInput {
    fn get(&self, ctx: &PageContext) -> MatchingData {
        if ctx.is(&PageType::Category) {
            MatchingData::String(ctx.id.clone())
        } else {
            MatchingData::None
        }
    }
}

/// `department`: the page id of a department page.
///
/// Blank ids are treated as absent, as for [`CategoryIdInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentIdInput;

impl DataInput<PageContext> for DepartmentIdInput {
    fn get(&self, ctx: &PageContext) -> MatchingData {
        if ctx.is(&PageType::Department) {
            MatchingData::String(ctx.id.clone())
        } else {
            MatchingData::None
        }
    }
}

/// `categoryTree` by tree lookup: the page id plus every ancestor the tree
/// knows about.
///
/// | Page type | Candidates |
/// |-----------|------------|
/// | department | page id |
/// | category | page id, owning department |
/// | subcategory | page id, owning department, owning categories |
/// | other | page id |
/// | absent | none |
///
/// Without a tree only the page id is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryLineageInput;

impl DataInput<PageContext> for CategoryLineageInput {
    fn get(&self, ctx: &PageContext) -> MatchingData {
        let Some(page_type) = &ctx.page_type else {
            return MatchingData::None;
        };
        match ctx.tree() {
            Some(tree) => MatchingData::Ids(tree.lineage_ids(&ctx.id, page_type)),
            None => MatchingData::Ids(vec![ctx.id.clone()]),
        }
    }

    fn data_type(&self) -> &'static str {
        "ids"
    }
}

/// `categoryTree` by parent id: the page id and the parent id reported with
/// the page, for category and department pages only. The tree is not read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentCategoryInput;

impl DataInput<PageContext> for ParentCategoryInput {
    fn get(&self, ctx: &PageContext) -> MatchingData {
        if !(ctx.is(&PageType::Category) || ctx.is(&PageType::Department)) {
            return MatchingData::None;
        }
        let mut ids = vec![ctx.id.clone()];
        if let Some(parent) = &ctx.parent_category_id {
            if parent != &ctx.id {
                ids.push(parent.clone());
            }
        }
        MatchingData::Ids(ids)
    }

    fn data_type(&self) -> &'static str {
        "ids"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, CategoryTree, Department, Subcategory};
    use std::sync::Arc;

    fn tree() -> Arc<CategoryTree> {
        Arc::new(CategoryTree::new(vec![Department::new(
            "D1",
            vec![Category::new("C1", vec![Subcategory::new("S1")])],
        )]))
    }

    fn ids(data: MatchingData) -> Vec<String> {
        data.as_ids().map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn category_input_applies_to_category_pages_only() {
        let input = CategoryIdInput;
        let page = PageContext::new("C1", PageType::Category);
        assert_eq!(input.get(&page), MatchingData::String("C1".into()));

        let page = PageContext::new("C1", PageType::Subcategory);
        assert!(input.get(&page).is_none());
        assert!(input.get(&PageContext::builder("C1").build()).is_none());
    }

    #[test]
    fn department_input_applies_to_department_pages_only() {
        let input = DepartmentIdInput;
        let page = PageContext::new("D1", PageType::Department);
        assert_eq!(input.get(&page), MatchingData::String("D1".into()));
        assert!(input.get(&PageContext::new("D1", PageType::Category)).is_none());
    }

    #[test]
    fn lineage_input_walks_tree() {
        let input = CategoryLineageInput;
        let page = PageContext::builder("S1")
            .page_type(PageType::Subcategory)
            .tree(tree())
            .build();
        assert_eq!(ids(input.get(&page)), vec!["S1", "D1", "C1"]);

        let page = PageContext::builder("C1")
            .page_type(PageType::Category)
            .tree(tree())
            .build();
        assert_eq!(ids(input.get(&page)), vec!["C1", "D1"]);
    }

    #[test]
    fn lineage_input_without_tree_uses_page_id() {
        let input = CategoryLineageInput;
        let page = PageContext::new("S1", PageType::Subcategory);
        assert_eq!(ids(input.get(&page)), vec!["S1"]);
    }

    #[test]
    fn lineage_input_without_type_is_none() {
        let page = PageContext::builder("S1").tree(tree()).build();
        assert!(CategoryLineageInput.get(&page).is_none());
    }

    #[test]
    fn lineage_input_other_type_uses_page_id() {
        let page = PageContext::builder("C1")
            .page_type("brand")
            .tree(tree())
            .build();
        assert_eq!(ids(CategoryLineageInput.get(&page)), vec!["C1"]);
    }

    #[test]
    fn parent_input_adds_parent_id() {
        let input = ParentCategoryInput;
        let page = PageContext::builder("C1")
            .page_type(PageType::Category)
            .parent_category_id("D1")
            .build();
        assert_eq!(ids(input.get(&page)), vec!["C1", "D1"]);

        let page = PageContext::new("D1", PageType::Department);
        assert_eq!(ids(input.get(&page)), vec!["D1"]);
    }

    #[test]
    fn parent_input_ignores_subcategory_and_tree() {
        let page = PageContext::builder("S1")
            .page_type(PageType::Subcategory)
            .parent_category_id("C1")
            .tree(tree())
            .build();
        assert!(ParentCategoryInput.get(&page).is_none());
    }

    #[test]
    fn list_inputs_report_ids_type() {
        assert_eq!(DataInput::<PageContext>::data_type(&CategoryIdInput), "string");
        assert_eq!(DataInput::<PageContext>::data_type(&CategoryLineageInput), "ids");
        assert_eq!(DataInput::<PageContext>::data_type(&ParentCategoryInput), "ids");
    }
}
