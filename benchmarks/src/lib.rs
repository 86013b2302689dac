//! Shared helpers for attest benchmark suites.
//!
//! Inputs are synthetic but shaped like real submissions: 28-byte keys,
//! datum-sized parameter values, chained validator references.

use std::collections::BTreeSet;

use attest_kernel::metadata::request::VerificationMetadata;
use attest_kernel::script::hash::{ScriptHash, SCRIPT_HASH_LEN};
use attest_kernel::script::version::PlutusVersion;
use attest_resolve::contract::{ParameterizeError, ScriptParameterizer};
use attest_resolve::input::{ParameterValue, ValidatorInputs};
use attest_resolve::schema::{ParameterSchema, SchemaType};
use attest_resolve::validator::{Validator, ValidatorId};
use sha2::{Digest, Sha256};

/// Deterministic 28-byte hash derived from `seed`.
#[must_use]
pub fn synthetic_hash(seed: u64) -> ScriptHash {
    let digest = Sha256::digest(seed.to_le_bytes());
    let mut bytes = [0u8; SCRIPT_HASH_LEN];
    bytes.copy_from_slice(&digest[..SCRIPT_HASH_LEN]);
    ScriptHash::from_bytes(bytes)
}

/// Metadata with `scripts` map entries of `params_per_script` values each.
///
/// Entries are inserted in reverse hash order so the encoder has to sort.
#[must_use]
pub fn synthetic_metadata(scripts: u64, params_per_script: usize) -> VerificationMetadata {
    let mut hashes: Vec<ScriptHash> = (0..scripts).map(synthetic_hash).collect();
    hashes.sort_unstable_by(|a, b| b.cmp(a));

    let value = format!("d8799f5820{}ff", "ab".repeat(32));
    let values: Vec<&str> = vec![value.as_str(); params_per_script];

    let mut metadata = VerificationMetadata::new(
        "https://github.com/acme/contracts",
        "35f1a0d51c8663782ab052f869d5c82b756e8615",
        "v1.1.3",
    )
    .with_source_path("onchain");
    for hash in hashes {
        metadata = metadata.with_parameters(&hash.to_hex(), &values);
    }
    metadata
}

/// A chain `v0 ← v1 ← … ← v{len-1}`: each validator takes its predecessor's
/// hash as its only parameter.
#[must_use]
pub fn chain(len: u64) -> (Vec<Validator>, ValidatorInputs) {
    let ids: Vec<ValidatorId> = (0..len)
        .map(|i| ValidatorId::new(&format!("m{i:04}"), "v"))
        .collect();
    let validators = ids
        .iter()
        .enumerate()
        .map(|(i, id)| Validator {
            id: id.clone(),
            purposes: BTreeSet::from(["spend".to_string()]),
            parameters: if i == 0 {
                Vec::new()
            } else {
                vec![ParameterSchema {
                    title: Some("upstream_hash".into()),
                    schema: SchemaType::Reference("#/definitions/ScriptHash".into()),
                }]
            },
            compiled_code: format!("5901{i:04x}0101"),
            plutus_version: PlutusVersion::V3,
            unparameterized_hash: synthetic_hash(u64::try_from(i).unwrap_or(u64::MAX)),
        })
        .collect();
    let inputs = ids
        .windows(2)
        .map(|pair| (pair[1].clone(), vec![ParameterValue::reference(pair[0].clone())]))
        .collect();
    (validators, inputs)
}

/// SHA-256 over `version | code | params`, truncated to a script hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchParameterizer;

impl ScriptParameterizer for BenchParameterizer {
    fn apply_parameters_and_hash(
        &self,
        compiled_code: &str,
        params: &[String],
        version: PlutusVersion,
    ) -> Result<String, ParameterizeError> {
        let mut h = Sha256::new();
        h.update(version.as_str());
        h.update(compiled_code);
        for p in params {
            h.update(b"|");
            h.update(p);
        }
        Ok(hex_prefix(&h.finalize()))
    }
}

fn hex_prefix(digest: &[u8]) -> String {
    let mut bytes = [0u8; SCRIPT_HASH_LEN];
    bytes.copy_from_slice(&digest[..SCRIPT_HASH_LEN]);
    ScriptHash::from_bytes(bytes).to_hex()
}
