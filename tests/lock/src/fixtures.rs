//! Locating and loading the golden fixtures in `<workspace>/tests/fixtures/`.

use std::path::{Path, PathBuf};

/// Workspace root, derived from this crate's manifest directory.
///
/// # Panics
///
/// Panics if the crate is not two levels below the workspace root.
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_path_buf()
}

/// Absolute path of a fixture file.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join("tests/fixtures").join(name)
}

/// Parse a fixture file as JSON.
///
/// # Panics
///
/// Panics if the file is missing or not JSON.
#[must_use]
pub fn load_json(path: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read fixture at {}: {e}", path.display()));
    serde_json::from_str(&contents).expect("fixture is valid JSON")
}
