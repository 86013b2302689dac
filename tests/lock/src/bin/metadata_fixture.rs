//! Tiny binary that encodes the interop fixture and prints deterministic output.
//!
//! Used by the cross-process determinism test to check that encoding does not
//! depend on process-level state (cwd, locale, env).
//!
//! Usage: `metadata_fixture` `<fixture-path>`
//! Output: `key=value` lines:
//!   `cbor`=...
//!   `chunk[i]`=... (one per chunk)
//!   `envelope`=...
//!   `digest=sha256`:...

use attest_harness::submission::MetadataRequest;
use attest_kernel::metadata::chunk::ChunkPolicy;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let fixture_path = args.get(1).expect("usage: metadata_fixture <fixture-path>");

    let contents = std::fs::read_to_string(fixture_path)
        .unwrap_or_else(|e| panic!("cannot read fixture at {fixture_path}: {e}"));
    let fixture: serde_json::Value =
        serde_json::from_str(&contents).expect("fixture is valid JSON");
    let request: MetadataRequest =
        serde_json::from_value(fixture["request"].clone()).expect("request section is valid");

    let submission = request
        .encode(&ChunkPolicy::default())
        .expect("fixture request encodes");

    println!("cbor={}", submission.cbor_hex);
    for (i, chunk) in submission.chunks.iter().enumerate() {
        println!("chunk[{i}]={chunk}");
    }
    println!("envelope={}", submission.envelope.to_cbor_hex());
    println!("digest={}", submission.digest);
}
