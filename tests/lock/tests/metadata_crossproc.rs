//! Cross-process determinism for metadata encoding.
//!
//! Spawns the `metadata_fixture` binary under several environment variants
//! and asserts identical output. Encoding must not be influenced by cwd,
//! locale, or unrelated environment variables.

use std::process::Command;

use lock_tests::fixtures::{fixture_path, load_json, workspace_root};

/// Resolve the path to the compiled binary.
///
/// `cargo test` puts test binaries in `target/<profile>/deps/`; the
/// `metadata_fixture` binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("metadata_fixture");
    path.to_string_lossy().to_string()
}

/// Run the binary with the given cwd and environment overrides.
/// Returns stdout as a string.
fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let fixture = fixture_path("interop_metadata.json");

    let mut command = Command::new(&bin);
    command.arg(&fixture).current_dir(work_dir);

    // Clear locale-related env to establish baseline, then apply overrides.
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "metadata_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root().to_string_lossy().to_string();
    let baseline = run_variant(&root, &[]);

    let fx = load_json(&fixture_path("interop_metadata.json"));
    assert!(
        baseline.contains(&format!("cbor={}\n", fx["expected_cbor_hex"].as_str().unwrap())),
        "baseline output does not carry the golden CBOR:\n{baseline}"
    );
    assert!(
        baseline.contains(&format!("digest={}\n", fx["expected_digest"].as_str().unwrap())),
        "baseline output does not carry the golden digest:\n{baseline}"
    );
    assert_eq!(baseline.lines().filter(|l| l.starts_with("chunk[")).count(), 4);

    // Different cwd.
    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &[]),
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Different locale.
    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );
    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "tr_TR.UTF-8"), ("LANG", "tr_TR.UTF-8")]),
        "output differs under a Turkish locale (case mapping)"
    );

    // Noise and verbose logging; logs go to stderr only.
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[("ATTEST_NOISE", "1"), ("RUST_LOG", "trace"), ("TZ", "Pacific/Kiritimati")]
        ),
        "output differs with unrelated env vars set"
    );
}
