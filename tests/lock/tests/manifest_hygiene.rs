//! Build-graph hygiene.
//!
//! Every dependency a member crate declares must be named somewhere in that
//! crate's Rust sources, and the workspace keeps the default panic strategy.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use lock_tests::fixtures::workspace_root;

/// Member crates, relative to the workspace root.
const MEMBERS: &[&str] = &["kernel", "resolve", "harness", "tests/lock", "benchmarks"];

/// Dependency names declared under `[dependencies]` and `[dev-dependencies]`.
fn declared_dependencies(manifest: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_deps = false;
    for line in manifest.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            in_deps = trimmed == "[dependencies]" || trimmed == "[dev-dependencies]";
            continue;
        }
        if !in_deps || trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((name, _)) = trimmed.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

/// Concatenated contents of every `.rs` file under `dir`.
fn rust_sources(dir: &Path, out: &mut String) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push_str(&content);
                out.push('\n');
            }
        }
    }
}

#[test]
fn every_declared_dependency_is_used() {
    let root = workspace_root();
    let mut unused = String::new();

    for member in MEMBERS {
        let dir = root.join(member);
        let manifest = fs::read_to_string(dir.join("Cargo.toml"))
            .unwrap_or_else(|e| panic!("cannot read {member}/Cargo.toml: {e}"));
        let mut sources = String::new();
        for sub in ["src", "tests", "benches"] {
            rust_sources(&dir.join(sub), &mut sources);
        }

        for dep in declared_dependencies(&manifest) {
            let path = format!("{}::", dep.replace('-', "_"));
            if !sources.contains(&path) {
                let _ = writeln!(unused, "  {member}: {dep}");
            }
        }
    }

    assert!(unused.is_empty(), "declared but never used:\n{unused}");
}

#[test]
fn manifest_parser_reads_both_dependency_tables() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\nhex = \"0.4\"\n\
                    # comment\n\n[dev-dependencies]\nproptest = \"1\"\n\n[[bin]]\nname = \"y\"\n";
    assert_eq!(declared_dependencies(manifest), vec!["hex", "proptest"]);
}

#[test]
fn workspace_keeps_default_panic_strategy() {
    let manifest =
        fs::read_to_string(workspace_root().join("Cargo.toml")).expect("workspace manifest");
    assert!(
        !manifest.lines().any(|l| l.trim_start().starts_with("panic")),
        "workspace profiles override the panic strategy"
    );
}
