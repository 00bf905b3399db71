//! Matcher keys and their registration.

use std::fmt;
use std::str::FromStr;

use condlayout::{Registry, RegistryBuilder};

use crate::{
    CategoryIdInput, CategoryLineageInput, DepartmentIdInput, PageContext, ParentCategoryInput,
};

/// A condition subject handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKey {
    /// `category`: the page is one of the listed categories.
    Category,
    /// `department`: the page is one of the listed departments.
    Department,
    /// `categoryTree`: the page or one of its ancestors is listed.
    CategoryTree,
}

impl MatcherKey {
    /// Every key, in registration order.
    pub const ALL: [Self; 3] = [Self::Category, Self::Department, Self::CategoryTree];

    /// The subject string used in layout configs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Department => "department",
            Self::CategoryTree => "categoryTree",
        }
    }
}

impl fmt::Display for MatcherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a subject is not a category matcher key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown matcher key \"{0}\", expected one of: category, department, categoryTree")]
pub struct UnknownMatcherKey(pub String);

impl FromStr for MatcherKey {
    type Err = UnknownMatcherKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownMatcherKey(s.to_owned()))
    }
}

/// How `categoryTree` resolves a page's ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeStrategy {
    /// Walk the shared [`CategoryTree`](crate::CategoryTree).
    #[default]
    Lineage,
    /// Use the parent id reported with the page. Category and department
    /// pages only.
    ParentId,
}

impl TreeStrategy {
    /// The spelling accepted by [`FromStr`] and the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lineage => "lineage",
            Self::ParentId => "parent-id",
        }
    }
}

impl fmt::Display for TreeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised tree strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tree strategy \"{0}\", expected one of: lineage, parent-id")]
pub struct UnknownTreeStrategy(pub String);

impl FromStr for TreeStrategy {
    type Err = UnknownTreeStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lineage" => Ok(Self::Lineage),
            "parent-id" => Ok(Self::ParentId),
            other => Err(UnknownTreeStrategy(other.to_owned())),
        }
    }
}

/// Register every [`MatcherKey`] with the default [`TreeStrategy`].
#[must_use]
pub fn register(builder: RegistryBuilder<PageContext>) -> RegistryBuilder<PageContext> {
    register_with(builder, TreeStrategy::default())
}

/// Register every [`MatcherKey`], resolving `categoryTree` with `strategy`.
#[must_use]
pub fn register_with(
    builder: RegistryBuilder<PageContext>,
    strategy: TreeStrategy,
) -> RegistryBuilder<PageContext> {
    let builder = builder
        .input::<CategoryIdInput>(MatcherKey::Category.as_str())
        .input::<DepartmentIdInput>(MatcherKey::Department.as_str());
    match strategy {
        TreeStrategy::Lineage => {
            builder.input::<CategoryLineageInput>(MatcherKey::CategoryTree.as_str())
        }
        TreeStrategy::ParentId => {
            builder.input::<ParentCategoryInput>(MatcherKey::CategoryTree.as_str())
        }
    }
}

/// A frozen registry with every key registered under `strategy`.
#[must_use]
pub fn registry(strategy: TreeStrategy) -> Registry<PageContext> {
    register_with(RegistryBuilder::new(), strategy).build()
}
