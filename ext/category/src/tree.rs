//! The department → category → subcategory tree.
//!
//! Owned by the upstream data provider and shared read-only. Depth is fixed at
//! three levels by the types, so the tree cannot contain cycles.

use condlayout::{deserialize_id, normalize_id};
use serde::Deserialize;

use crate::PageType;

/// Ordered list of departments.
///
/// Deserializes from a JSON/YAML array of departments. Ids may be strings or
/// numbers; they are stored normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    departments: Vec<Department>,
}

/// Root-level node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Department {
    /// Department id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Categories under this department.
    #[serde(default)]
    pub children: Vec<Category>,
}

/// Second-level node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Category id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Subcategories under this category.
    #[serde(default)]
    pub children: Vec<Subcategory>,
}

/// Leaf node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subcategory {
    /// Subcategory id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Where a subcategory sits in the tree.
///
/// `department` is the first department (in tree order) holding the
/// subcategory. `categories` lists every category under that department that
/// holds it, in tree order; it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryLineage<'a> {
    /// Owning department.
    pub department: &'a Department,
    /// Owning categories within `department`.
    pub categories: Vec<&'a Category>,
}

impl SubcategoryLineage<'_> {
    /// More than one category under the department lists the subcategory.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.categories.len() > 1
    }
}

impl CategoryTree {
    /// Build a tree from departments.
    #[must_use]
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    /// Departments in tree order.
    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Returns `true` if the tree has no departments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Find a department by id.
    #[must_use]
    pub fn department(&self, id: &str) -> Option<&Department> {
        let id = normalize_id(id);
        self.departments.iter().find(|d| d.id == id)
    }

    /// Find the department whose children include category `id`.
    #[must_use]
    pub fn department_of_category(&self, id: &str) -> Option<&Department> {
        let id = normalize_id(id);
        self.departments
            .iter()
            .find(|d| d.category(id).is_some())
    }

    /// Locate the owners of subcategory `id`.
    ///
    /// Returns `None` when no department holds it.
    #[must_use]
    pub fn subcategory_lineage(&self, id: &str) -> Option<SubcategoryLineage<'_>> {
        let id = normalize_id(id);
        let department = self
            .departments
            .iter()
            .find(|d| d.children.iter().any(|c| c.contains_subcategory(id)))?;
        let categories = department
            .children
            .iter()
            .filter(|c| c.contains_subcategory(id))
            .collect();
        Some(SubcategoryLineage {
            department,
            categories,
        })
    }

    /// Ids a page of `page_type` answers to: its own id first, then its
    /// ancestors. Deduplicated, in tree order.
    ///
    /// A subcategory listed under several categories of its department yields
    /// every owner. Ids that are not found yield only the page's own id.
    #[must_use]
    pub fn lineage_ids(&self, id: &str, page_type: &PageType) -> Vec<String> {
        let id = normalize_id(id);
        let mut ids = vec![id.to_owned()];
        match page_type {
            PageType::Category => {
                if let Some(department) = self.department_of_category(id) {
                    push_unique(&mut ids, &department.id);
                }
            }
            PageType::Subcategory => {
                if let Some(lineage) = self.subcategory_lineage(id) {
                    if lineage.is_ambiguous() {
                        tracing::warn!(
                            subcategory = id,
                            department = %lineage.department.id,
                            owners = lineage.categories.len(),
                            "subcategory listed under several categories, matching all owners"
                        );
                    }
                    push_unique(&mut ids, &lineage.department.id);
                    for category in &lineage.categories {
                        push_unique(&mut ids, &category.id);
                    }
                }
            }
            PageType::Department | PageType::Other(_) => {}
        }
        tracing::debug!(id, %page_type, lineage = ?ids, "lineage resolved");
        ids
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_owned());
    }
}

impl FromIterator<Department> for CategoryTree {
    fn from_iter<I: IntoIterator<Item = Department>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Department {
    /// Build a department.
    pub fn new(id: impl AsRef<str>, children: Vec<Category>) -> Self {
        Self {
            id: normalize_id(id.as_ref()).to_owned(),
            children,
        }
    }

    /// Find a direct child category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        let id = normalize_id(id);
        self.children.iter().find(|c| c.id == id)
    }
}

impl Category {
    /// Build a category.
    pub fn new(id: impl AsRef<str>, children: Vec<Subcategory>) -> Self {
        Self {
            id: normalize_id(id.as_ref()).to_owned(),
            children,
        }
    }

    /// Returns `true` if subcategory `id` is a direct child.
    #[must_use]
    pub fn contains_subcategory(&self, id: &str) -> bool {
        let id = normalize_id(id);
        self.children.iter().any(|s| s.id == id)
    }
}

impl Subcategory {
    /// Build a subcategory.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: normalize_id(id.as_ref()).to_owned(),
        }
    }
}
