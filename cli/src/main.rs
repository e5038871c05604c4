//! urltrie CLI: driving adapter for the urltrie pattern matcher.
//!
//! Subcommands:
//! - `check <catalog>`: load a catalog and report what was registered
//! - `top <catalog> <METHOD>`: print the root's children for a method
//! - `suggest <catalog> <METHOD> <path>`: print candidates for the last segment
//! - `resolve <catalog> <METHOD> <path>`: print endpoints matching a full path

use std::process;

use tracing_subscriber::EnvFilter;
use urltrie::{CatalogConfig, NodeKind, UrlPatternMatcher};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => cmd_check(&args[2..]),
        "top" => cmd_top(&args[2..]),
        "suggest" => cmd_suggest(&args[2..]),
        "resolve" => cmd_resolve(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [catalog_path] = args else {
        return Err("check requires a catalog file path".into());
    };

    let catalog = load_catalog(catalog_path)?;
    let total = catalog.endpoints.len();
    let mut matcher = UrlPatternMatcher::new();
    let registered = matcher.load_catalog(catalog);

    println!("Catalog valid: {registered} of {total} endpoints registered");
    Ok(())
}

fn cmd_top(args: &[String]) -> Result<(), String> {
    let [catalog_path, method] = args else {
        return Err("top requires <catalog> <METHOD>".into());
    };

    let matcher = build_matcher(catalog_path)?;
    for node in matcher.top_level_components(method) {
        println!("{}", describe(node.key(), node.kind()));
    }
    Ok(())
}

fn cmd_suggest(args: &[String]) -> Result<(), String> {
    let (catalog_path, method, path) = match args {
        [catalog_path, method] => (catalog_path, method, ""),
        [catalog_path, method, path] => (catalog_path, method, path.as_str()),
        _ => return Err("suggest requires <catalog> <METHOD> [path]".into()),
    };

    let matcher = build_matcher(catalog_path)?;
    let suggestions = matcher.suggest(method, path);
    if suggestions.is_empty() {
        println!("(no suggestions)");
    }
    for suggestion in suggestions {
        println!("{}\t{:?}\t{}", suggestion.text, suggestion.kind, suggestion.component);
    }
    Ok(())
}

fn cmd_resolve(args: &[String]) -> Result<(), String> {
    let [catalog_path, method, path] = args else {
        return Err("resolve requires <catalog> <METHOD> <path>".into());
    };

    let matcher = build_matcher(catalog_path)?;
    let resolved = matcher.resolve(method, path);
    if resolved.is_empty() {
        println!("(no match)");
    }
    for hit in resolved {
        println!("{}", hit.endpoint.id);
        if let Some(body) = hit.body {
            let pretty = serde_json::to_string_pretty(body)
                .map_err(|e| format!("failed to render body template: {e}"))?;
            for line in pretty.lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Matcher assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn load_catalog(path: &str) -> Result<CatalogConfig, String> {
    CatalogConfig::from_path(path).map_err(|e| e.to_string())
}

fn build_matcher(path: &str) -> Result<UrlPatternMatcher, String> {
    let catalog = load_catalog(path)?;
    let mut matcher = UrlPatternMatcher::new();
    let registered = matcher.load_catalog(catalog);
    tracing::debug!(path, registered, "catalog loaded");
    Ok(matcher)
}

fn describe(key: &str, kind: &NodeKind) -> String {
    match kind {
        NodeKind::Constant { options } => format!("{key}\tliteral\t{}", options.join(", ")),
        NodeKind::List { values, .. } => format!("{{{key}}}\tlist\t{}", values.join(", ")),
        NodeKind::Param => format!("{{{key}}}\tparam"),
        NodeKind::FullRequest { .. } => format!("{key}\tbody"),
        NodeKind::Custom(_) => format!("{{{key}}}\tcustom"),
        NodeKind::Root => key.to_owned(),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: urltrie <command> [options]

Commands:
  check <catalog>                    Validate and register a catalog
  top <catalog> <METHOD>             Print top-level components
  suggest <catalog> <METHOD> [path]  Print candidates for the last segment of path
  resolve <catalog> <METHOD> <path>  Print endpoints matching path
  help                               Show this help

Catalogs ending in .json are read as JSON, anything else as YAML.
Set RUST_LOG=debug to trace registration."
    );
}
