//! Canonical container encoder for verification metadata.
//!
//! **Exactly one place** turns [`VerificationMetadata`] into bytes. The
//! registry backend decodes these bytes with an independent implementation,
//! so the output must be identical regardless of how the caller built the
//! parameter map.
//!
//! # Layout
//!
//! ```text
//! Constr(compiler.id(), [
//!     Bytes(utf8(source_url)),
//!     Bytes(hex(commit)),
//!     Bytes(utf8(source_path or "")),
//!     Bytes(utf8(compiler_version)),
//!     Map { Bytes(script_hash) => List[Bytes(param_cbor), ...] },
//! ])
//! ```
//!
//! # Canonical ordering
//!
//! Map entries are sorted by the lowercase hex of their script hash before
//! writing. Script hashes are fixed-length, so this is the same order as the
//! raw bytes. Parameter lists keep their order (it is application order).
//!
//! Parameter values are embedded as byte strings whose payload is the
//! already-canonical CBOR of the value. They are never parsed or re-encoded.

use crate::cbor::hex_input::{decode_hex, normalize_hex};
use crate::data::plutus::PlutusData;
use crate::error::MetadataError;
use crate::metadata::request::VerificationMetadata;
use crate::script::hash::ScriptHash;

/// Build the `PlutusData` value for `metadata`.
///
/// # Errors
///
/// - [`MetadataError::MalformedCommit`] if the commit is empty or not hex.
/// - [`MetadataError::InvalidScriptHash`] if a map key is not a 28-byte hash.
/// - [`MetadataError::DuplicateScriptHash`] if two keys name the same hash.
/// - [`MetadataError::MalformedParameter`] if a parameter value is empty or not hex.
pub fn build_metadata_data(metadata: &VerificationMetadata) -> Result<PlutusData, MetadataError> {
    let commit = normalize_hex(&metadata.commit)
        .and_then(|hex| decode_hex(&hex))
        .map_err(MetadataError::MalformedCommit)?;

    let mut entries: Vec<(ScriptHash, Vec<Vec<u8>>)> = Vec::with_capacity(metadata.parameters.len());
    for entry in &metadata.parameters {
        let hash = ScriptHash::parse(&entry.script_hash).map_err(|source| {
            MetadataError::InvalidScriptHash {
                key: entry.script_hash.clone(),
                source,
            }
        })?;
        let mut values = Vec::with_capacity(entry.values.len());
        for (index, value) in entry.values.iter().enumerate() {
            let bytes = normalize_hex(value)
                .and_then(|hex| decode_hex(&hex))
                .map_err(|source| MetadataError::MalformedParameter {
                    script_hash: hash.to_hex(),
                    index,
                    source,
                })?;
            values.push(bytes);
        }
        entries.push((hash, values));
    }

    // Byte order of fixed-length hashes == case-insensitive hex order.
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    if let Some(pair) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(MetadataError::DuplicateScriptHash {
            key: pair[0].0.to_hex(),
        });
    }

    let map = entries
        .into_iter()
        .map(|(hash, values)| {
            (
                PlutusData::Bytes(hash.as_bytes().to_vec()),
                PlutusData::List(values.into_iter().map(PlutusData::Bytes).collect()),
            )
        })
        .collect();

    Ok(PlutusData::Constr {
        alternative: metadata.compiler.id(),
        fields: vec![
            PlutusData::utf8(&metadata.source_url),
            PlutusData::Bytes(commit),
            PlutusData::utf8(metadata.source_path.as_deref().unwrap_or("")),
            PlutusData::utf8(&metadata.compiler_version),
            PlutusData::Map(map),
        ],
    })
}

/// Canonical CBOR bytes for `metadata`.
///
/// # Errors
///
/// See [`build_metadata_data`].
pub fn encode_metadata_bytes(metadata: &VerificationMetadata) -> Result<Vec<u8>, MetadataError> {
    let bytes = build_metadata_data(metadata)?.to_cbor_bytes();
    tracing::debug!(
        scripts = metadata.parameters.len(),
        bytes = bytes.len(),
        compiler = %metadata.compiler,
        "encoded verification metadata"
    );
    Ok(bytes)
}

/// Canonical CBOR for `metadata` as a single lowercase hex string.
///
/// # Errors
///
/// See [`build_metadata_data`].
pub fn encode_metadata(metadata: &VerificationMetadata) -> Result<String, MetadataError> {
    encode_metadata_bytes(metadata).map(hex::encode)
}
