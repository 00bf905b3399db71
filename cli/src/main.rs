//! condlayout CLI: driving adapter for the condlayout condition engine.
//!
//! Subcommands:
//! - `eval <config> --id <ID> --type <TYPE> [--parent-category-id <ID>] [--tree <file>]`:
//!   choose a branch for one page
//! - `check <config>`: validate config loads without errors
//! - `info`: print registered subjects

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use condlayout::{LayoutConfig, PredicateTrace, Registry};
use condlayout_category::{CategoryTree, PageContext, PageType, TreeStrategy};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

/// Evaluate storefront condition layouts against a page
#[derive(Parser, Debug)]
#[command(name = "condlayout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// How `categoryTree` resolves ancestors: lineage or parent-id
    #[arg(long, default_value = "lineage", global = true)]
    strategy: TreeStrategy,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Choose the branch a layout renders for a page
    Eval {
        /// Layout config (.json, otherwise YAML)
        config: PathBuf,

        /// Page id
        #[arg(long)]
        id: String,

        /// Page type: category, department, subcategory or any other string
        #[arg(long = "type")]
        page_type: Option<String>,

        /// Direct parent id reported with the page
        #[arg(long)]
        parent_category_id: Option<String>,

        /// Category tree (.json, otherwise YAML)
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Print every condition's result
        #[arg(long)]
        trace: bool,
    },

    /// Validate that a layout config loads
    Check {
        /// Layout config (.json, otherwise YAML)
        config: PathBuf,
    },

    /// Print registered subjects
    Info,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Eval {
            config,
            id,
            page_type,
            parent_category_id,
            tree,
            trace,
        } => {
            let page = PageArgs {
                id,
                page_type: page_type.as_deref(),
                parent_category_id: parent_category_id.as_deref(),
                tree: tree.as_deref(),
            };
            cmd_eval(cli.strategy, config, &page, *trace).map(|out| print!("{out}"))
        }
        Commands::Check { config } => cmd_check(cli.strategy, config).map(|out| print!("{out}")),
        Commands::Info => {
            print!("{}", cmd_info(cli.strategy));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

struct PageArgs<'a> {
    id: &'a str,
    page_type: Option<&'a str>,
    parent_category_id: Option<&'a str>,
    tree: Option<&'a Path>,
}

fn cmd_eval(strategy: TreeStrategy, config: &Path, page: &PageArgs<'_>, trace: bool) -> Result<String> {
    let layout = build_registry(strategy)
        .load_layout(load_file::<LayoutConfig>(config)?)
        .with_context(|| format!("config load failed: {}", config.display()))?;

    let tree = page
        .tree
        .map(|path| load_file::<CategoryTree>(path).map(Arc::new))
        .transpose()?;
    let ctx = build_page_context(page, tree);
    tracing::info!(id = %ctx.id, page_type = ?ctx.page_type, %strategy, "evaluating layout");

    if !trace {
        return Ok(format!("{}\n", layout.choose(&ctx)));
    }
    let trace = layout.choose_with_trace(&ctx);
    let mut out = format!("{} (matchType: {})\n", trace.branch, trace.match_type);
    render_trace(&trace.predicate, 1, &mut out);
    Ok(out)
}

fn cmd_check(strategy: TreeStrategy, config: &Path) -> Result<String> {
    let layout = build_registry(strategy)
        .load_layout(load_file::<LayoutConfig>(config)?)
        .with_context(|| format!("config invalid: {}", config.display()))?;
    Ok(format!(
        "Config valid ({} conditions, matchType {})\n",
        layout.len(),
        layout.match_type()
    ))
}

fn cmd_info(strategy: TreeStrategy) -> String {
    let mut out = format!("Registered subjects (categoryTree strategy: {strategy}):\n");
    for subject in build_registry(strategy).subjects() {
        let _ = writeln!(out, "  {subject}");
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry and context assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn build_registry(strategy: TreeStrategy) -> Registry<PageContext> {
    condlayout_category::registry(strategy)
}

fn build_page_context(page: &PageArgs<'_>, tree: Option<Arc<CategoryTree>>) -> PageContext {
    let mut builder = PageContext::builder(page.id).maybe_tree(tree);
    if let Some(page_type) = page.page_type {
        builder = builder.page_type(PageType::from(page_type));
    }
    if let Some(parent) = page.parent_category_id {
        builder = builder.parent_category_id(parent);
    }
    builder.build()
}

fn render_trace(trace: &PredicateTrace, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let mark = |matched: bool| if matched { "✓" } else { "✗" };
    let _ = match trace {
        PredicateTrace::Single {
            matched,
            input,
            data,
            matcher,
        } => writeln!(out, "{indent}{} {input} {data} in {matcher}", mark(*matched)),
        PredicateTrace::And { matched, .. } => writeln!(out, "{indent}{} and", mark(*matched)),
        PredicateTrace::Or { matched, .. } => writeln!(out, "{indent}{} or", mark(*matched)),
        PredicateTrace::Not { matched, .. } => writeln!(out, "{indent}{} not", mark(*matched)),
    };
    match trace {
        PredicateTrace::And { children, .. } | PredicateTrace::Or { children, .. } => {
            for child in children {
                render_trace(child, depth + 1, out);
            }
        }
        PredicateTrace::Not { inner, .. } => render_trace(inner, depth + 1, out),
        PredicateTrace::Single { .. } => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;
    parse(&content, is_json(path)).with_context(|| format!("failed to parse \"{}\"", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse<T: DeserializeOwned>(content: &str, json: bool) -> Result<T> {
    if json {
        serde_json::from_str(content).context("JSON parse error")
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).context("YAML parse error")
    }
}
