//! Conformance tests that run YAML fixtures against condlayout-category
//!
//! Each fixture file holds one or more documents separated by `---`. A
//! document names a layout config, an optional tree and strategy, and the
//! branch expected for each page context.

use condlayout::{Branch, IdValue, LayoutConfig};
use condlayout_category::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A complete test fixture
#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    #[serde(default)]
    description: String,
    /// `lineage` (default) or `parent-id`.
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    tree: Option<CategoryTree>,
    layout: LayoutConfig,
    cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    context: ContextFixture,
    expect: Branch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextFixture {
    id: IdValue,
    #[serde(rename = "type", default)]
    page_type: Option<PageType>,
    #[serde(default)]
    parent_category_id: Option<IdValue>,
    /// Set to `false` to evaluate as if the tree had not loaded.
    #[serde(default = "with_tree")]
    tree: bool,
}

fn with_tree() -> bool {
    true
}

impl Fixture {
    fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        serde_yaml::Deserializer::from_str(yaml)
            .map(Fixture::deserialize)
            .collect()
    }

    fn context(&self, case: &ContextFixture, tree: Option<&Arc<CategoryTree>>) -> PageContext {
        let mut builder = PageContext::builder(case.id.clone().into_normalized());
        if let Some(page_type) = &case.page_type {
            builder = builder.page_type(page_type.clone());
        }
        if let Some(parent) = &case.parent_category_id {
            builder = builder.parent_category_id(parent.clone().into_normalized());
        }
        if case.tree {
            builder = builder.maybe_tree(tree.cloned());
        }
        builder.build()
    }

    fn run_and_assert(&self) {
        let strategy = self
            .strategy
            .as_deref()
            .map(|s| s.parse::<TreeStrategy>().expect("strategy"))
            .unwrap_or_default();
        let layout = registry(strategy)
            .load_layout(self.layout.clone())
            .unwrap_or_else(|e| panic!("[{}] layout failed to load: {e}", self.name));
        let tree = self.tree.clone().map(Arc::new);
        let mut memo = MemoizedChoice::new(
            registry(strategy)
                .load_layout(self.layout.clone())
                .expect("layout"),
        );

        for case in &self.cases {
            let ctx = self.context(&case.context, tree.as_ref());
            let branch = layout.choose(&ctx);
            assert_eq!(
                branch, case.expect,
                "[{}] {}: {}\n  context: {ctx:?}",
                self.name, case.name, self.description
            );
            assert_eq!(
                layout.choose_with_trace(&ctx).branch,
                branch,
                "[{}] {}: trace disagrees with choose",
                self.name,
                case.name
            );
            assert_eq!(
                memo.choose(&ctx),
                branch,
                "[{}] {}: memoized choice disagrees",
                self.name,
                case.name
            );
        }
    }
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn run_fixture_file(file: &str) {
    let path = fixtures_dir().join(file);
    let yaml = fs::read_to_string(&path).expect("read yaml");
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_direct_keys() {
    run_fixture_file("01_direct_keys.yaml");
}

#[test]
fn test_category_tree_lineage() {
    run_fixture_file("02_category_tree_lineage.yaml");
}

#[test]
fn test_category_tree_parent_id() {
    run_fixture_file("03_category_tree_parent_id.yaml");
}

#[test]
fn test_match_types() {
    run_fixture_file("04_match_types.yaml");
}

#[test]
fn test_id_normalization() {
    run_fixture_file("05_ids.yaml");
}

#[test]
fn every_fixture_file_is_run() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml"))
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            "01_direct_keys.yaml",
            "02_category_tree_lineage.yaml",
            "03_category_tree_parent_id.yaml",
            "04_match_types.yaml",
            "05_ids.yaml",
        ]
    );
}
