//! Submission pipeline and hash comparison.
//!
//! ```text
//! ResolutionOutcome ──► VerificationMetadata ──► CBOR ──► chunks ──► envelope
//!                                                  └──► digest
//! ```
//!
//! Parameter maps are keyed by each validator's **unparameterized** hash:
//! the registry looks parameters up by the raw script hash and re-applies
//! them itself. Only validators whose every slot resolved are included; the
//! rest are listed in [`Submission::omitted`] and the caller decides whether
//! to submit anyway.

use std::collections::BTreeMap;
use std::path::Path;

use attest_kernel::metadata::chunk::ChunkPolicy;
use attest_kernel::metadata::encode::encode_metadata_bytes;
use attest_kernel::metadata::envelope::MetadataEnvelope;
use attest_kernel::metadata::request::{CompilerType, ParameterEntry, VerificationMetadata};
use attest_resolve::engine::ResolutionOutcome;
use attest_resolve::validator::{Validator, ValidatorId};
use serde::{Deserialize, Serialize};

use crate::digest::PayloadDigest;
use crate::error::SubmissionError;
use crate::source::{validate_commit, SourceUrl};

/// Where the verified source lives and how it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub source_url: String,
    pub commit: String,
    #[serde(default)]
    pub source_path: Option<String>,
    /// Compiler family name; Aiken when absent.
    #[serde(default)]
    pub compiler: Option<String>,
    pub compiler_version: String,
}

impl SubmissionRequest {
    /// Validate the request and build metadata with an empty parameter map.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::Source`] for a malformed URL or commit.
    /// - [`SubmissionError::UnknownCompiler`] for an unrecognised compiler name.
    pub fn to_metadata(&self) -> Result<VerificationMetadata, SubmissionError> {
        SourceUrl::parse(&self.source_url)?;
        validate_commit(&self.commit)?;
        let compiler = match &self.compiler {
            None => CompilerType::default(),
            Some(name) => CompilerType::from_name(name).ok_or_else(|| {
                SubmissionError::UnknownCompiler { name: name.clone() }
            })?,
        };
        let mut metadata =
            VerificationMetadata::new(&self.source_url, &self.commit, &self.compiler_version)
                .with_compiler(compiler);
        metadata.source_path.clone_from(&self.source_path);
        Ok(metadata)
    }
}

/// A request that carries its parameter map directly (already encoded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRequest {
    #[serde(flatten)]
    pub source: SubmissionRequest,
    /// Script hash → canonical CBOR hex values.
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<String>>,
}

impl MetadataRequest {
    /// Read a request file.
    ///
    /// # Errors
    ///
    /// [`SubmissionError::Io`] or [`SubmissionError::Json`].
    pub fn read(path: &Path) -> Result<Self, SubmissionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SubmissionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Encode this request.
    ///
    /// # Errors
    ///
    /// As [`SubmissionRequest::to_metadata`], plus any kernel
    /// [`MetadataError`](attest_kernel::error::MetadataError).
    pub fn encode(&self, policy: &ChunkPolicy) -> Result<Submission, SubmissionError> {
        let mut metadata = self.source.to_metadata()?;
        metadata.parameters = self
            .parameters
            .iter()
            .map(|(script_hash, values)| ParameterEntry {
                script_hash: script_hash.clone(),
                values: values.clone(),
            })
            .collect();
        package(metadata, policy, Vec::new(), Vec::new())
    }
}

/// Everything needed to attach verification metadata to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub metadata: VerificationMetadata,
    /// Canonical CBOR of `metadata`, lowercase hex.
    pub cbor_hex: String,
    pub chunks: Vec<String>,
    pub envelope: MetadataEnvelope,
    pub digest: PayloadDigest,
    /// Parameterized validators whose parameters are in the map.
    pub included: Vec<ValidatorId>,
    /// Parameterized validators left out because a slot did not resolve.
    pub omitted: Vec<ValidatorId>,
}

/// Build a submission from a resolution outcome.
///
/// # Errors
///
/// Fatal for the whole submission: invalid source URL or commit, unknown
/// compiler, or a metadata encoding failure.
pub fn build_submission(
    request: &SubmissionRequest,
    validators: &[Validator],
    outcome: &ResolutionOutcome,
) -> Result<Submission, SubmissionError> {
    let mut metadata = request.to_metadata()?;
    let mut included = Vec::new();
    let mut omitted = Vec::new();

    for validator in validators.iter().filter(|v| v.is_parameterized()) {
        if let Some(params) = outcome.resolved_params.get(&validator.id) {
            metadata.parameters.push(ParameterEntry {
                script_hash: validator.unparameterized_hash.to_hex(),
                values: params.clone(),
            });
            included.push(validator.id.clone());
        } else {
            tracing::warn!(validator = %validator.id, "parameters unresolved; omitted from submission");
            omitted.push(validator.id.clone());
        }
    }

    package(metadata, &ChunkPolicy::default(), included, omitted)
}

fn package(
    metadata: VerificationMetadata,
    policy: &ChunkPolicy,
    included: Vec<ValidatorId>,
    omitted: Vec<ValidatorId>,
) -> Result<Submission, SubmissionError> {
    policy.validate()?;
    let bytes = encode_metadata_bytes(&metadata)?;
    let cbor_hex = hex::encode(&bytes);
    let chunks = policy.split(&cbor_hex)?;
    let envelope = MetadataEnvelope::from_hex_chunks(&chunks)?;
    let digest = PayloadDigest::of(&bytes);
    tracing::info!(
        bytes = bytes.len(),
        chunks = chunks.len(),
        included = included.len(),
        omitted = omitted.len(),
        digest = %digest,
        "submission built"
    );
    Ok(Submission {
        metadata,
        cbor_hex,
        chunks,
        envelope,
        digest,
        included,
        omitted,
    })
}

/// Actual vs expected script hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashComparison {
    pub matched: Vec<String>,
    pub unmatched_actual: Vec<String>,
    pub unmatched_expected: Vec<String>,
}

impl HashComparison {
    /// Every actual hash was expected and the counts agree.
    #[must_use]
    pub fn all_match(&self) -> bool {
        self.unmatched_actual.is_empty() && self.unmatched_expected.is_empty()
    }
}

/// Compare each validator's current hash against `expected`.
///
/// A validator's current hash is its resolved hash, or the unparameterized
/// one if the outcome does not know it. Comparison ignores case.
#[must_use]
pub fn compare_hashes(
    expected: &[String],
    outcome: &ResolutionOutcome,
    validators: &[Validator],
) -> HashComparison {
    let expected: Vec<String> = expected
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect();
    let actual: Vec<String> = validators
        .iter()
        .map(|v| {
            outcome
                .hash_of(&v.id)
                .unwrap_or(&v.unparameterized_hash)
                .to_hex()
        })
        .collect();

    let mut report = HashComparison::default();
    for hash in &actual {
        if expected.contains(hash) {
            report.matched.push(hash.clone());
        } else {
            report.unmatched_actual.push(hash.clone());
        }
    }
    report.unmatched_expected = expected
        .into_iter()
        .filter(|h| !actual.contains(h))
        .collect();
    report
}

/// Parse a list of expected hashes: a JSON array of strings, or hashes
/// separated by whitespace or commas.
///
/// # Errors
///
/// [`SubmissionError::Json`] if the input looks like a JSON array but is not one.
pub fn parse_expected_hashes(text: &str) -> Result<Vec<String>, SubmissionError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    Ok(trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
