//! Interop golden vector lock.
//!
//! The registry backend decodes metadata with an independent encoder. These
//! tests pin every byte of the shared vector: CBOR, chunk boundaries,
//! envelope and digest. A failure here is a protocol break.

use attest_harness::submission::MetadataRequest;
use attest_kernel::metadata::chunk::{chunk_hex, ChunkPolicy};
use attest_kernel::metadata::encode::encode_metadata;
use attest_kernel::metadata::envelope::MetadataEnvelope;
use attest_kernel::metadata::request::VerificationMetadata;
use lock_tests::fixtures::{fixture_path, load_json};

fn fixture() -> serde_json::Value {
    load_json(&fixture_path("interop_metadata.json"))
}

fn request(fixture: &serde_json::Value) -> MetadataRequest {
    serde_json::from_value(fixture["request"].clone()).expect("request section is valid")
}

fn expected_chunks(fixture: &serde_json::Value) -> Vec<String> {
    fixture["expected_chunks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect()
}

// --- Kernel level ---

#[test]
fn kernel_encoder_matches_vector() {
    let fx = fixture();
    let req = request(&fx);
    let mut metadata = VerificationMetadata::new(
        &req.source.source_url,
        &req.source.commit,
        &req.source.compiler_version,
    )
    .with_source_path(req.source.source_path.as_deref().unwrap_or(""));
    for (hash, values) in &req.parameters {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        metadata = metadata.with_parameters(hash, &values);
    }

    let hex = encode_metadata(&metadata).unwrap();
    assert_eq!(hex, fx["expected_cbor_hex"].as_str().unwrap());
    assert_eq!(hex.len() / 2, usize::try_from(fx["expected_bytes"].as_u64().unwrap()).unwrap());
    assert_eq!(chunk_hex(&hex, 128).unwrap(), expected_chunks(&fx));
}

#[test]
fn map_order_in_input_does_not_matter() {
    let fx = fixture();
    let req = request(&fx);
    let entries: Vec<(&String, &Vec<String>)> = req.parameters.iter().collect();

    let build = |order: &[usize]| {
        let mut m = VerificationMetadata::new(
            &req.source.source_url,
            &req.source.commit,
            &req.source.compiler_version,
        );
        for &i in order {
            let (hash, values) = entries[i];
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            m = m.with_parameters(hash, &values);
        }
        encode_metadata(&m).unwrap()
    };

    assert_eq!(build(&[0, 1]), build(&[1, 0]));
    assert_eq!(build(&[1, 0]), fx["expected_cbor_hex"].as_str().unwrap());
}

#[test]
fn envelope_matches_vector() {
    let fx = fixture();
    let env = MetadataEnvelope::from_hex_chunks(&expected_chunks(&fx)).unwrap();
    assert_eq!(env.label(), 1984);
    assert_eq!(env.to_cbor_hex(), fx["expected_envelope_hex"].as_str().unwrap());
    assert!(env.chunks().iter().all(|c| c.len() <= 64));
}

// --- Pipeline level ---

#[test]
fn pipeline_matches_vector() {
    let fx = fixture();
    let sub = request(&fx).encode(&ChunkPolicy::default()).unwrap();
    assert_eq!(sub.cbor_hex, fx["expected_cbor_hex"].as_str().unwrap());
    assert_eq!(sub.chunks, expected_chunks(&fx));
    assert_eq!(
        sub.envelope.to_cbor_hex(),
        fx["expected_envelope_hex"].as_str().unwrap()
    );
    assert_eq!(sub.digest.as_str(), fx["expected_digest"].as_str().unwrap());
}

#[test]
fn uppercase_input_encodes_identically() {
    let fx = fixture();
    let mut req = request(&fx);
    req.parameters = req
        .parameters
        .into_iter()
        .map(|(k, v)| (k.to_uppercase(), v.iter().map(|s| s.to_uppercase()).collect()))
        .collect();
    req.source.commit = req.source.commit.to_uppercase();
    let sub = req.encode(&ChunkPolicy::default()).unwrap();
    assert_eq!(sub.cbor_hex, fx["expected_cbor_hex"].as_str().unwrap());
}
