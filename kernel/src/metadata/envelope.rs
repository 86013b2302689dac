//! Transaction metadata envelope under label 1984.
//!
//! The chunked payload is attached to a transaction as
//! `{ 1984: [chunk_0, chunk_1, ...] }`, each chunk a definite byte string of
//! at most 64 bytes. The envelope encodes that map so callers building the
//! transaction body (or checking one) have a single canonical form.

use crate::cbor::hex_input::{decode_hex, normalize_hex};
use crate::cbor::primitive::{write_byte_string, write_head, MajorType};
use crate::data::plutus::MAX_BYTES_CHUNK;
use crate::error::MetadataError;

/// Metadata label registered for verification submissions.
pub const METADATA_LABEL: u64 = 1984;

/// Per-entry byte ceiling of transaction metadata.
pub const MAX_METADATA_BYTES: usize = MAX_BYTES_CHUNK;

/// Decoded chunks keyed under a metadata label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEnvelope {
    label: u64,
    chunks: Vec<Vec<u8>>,
}

impl MetadataEnvelope {
    /// Build an envelope under [`METADATA_LABEL`] from hex chunks.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::MalformedChunk`] if a chunk is not valid hex.
    /// - [`MetadataError::ChunkTooLarge`] if a chunk decodes to more than 64 bytes.
    pub fn from_hex_chunks<S: AsRef<str>>(chunks: &[S]) -> Result<Self, MetadataError> {
        let decoded = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let bytes = normalize_hex(chunk.as_ref())
                    .and_then(|hex| decode_hex(&hex))
                    .map_err(|source| MetadataError::MalformedChunk { index, source })?;
                if bytes.len() > MAX_METADATA_BYTES {
                    return Err(MetadataError::ChunkTooLarge {
                        index,
                        len: bytes.len(),
                        max: MAX_METADATA_BYTES,
                    });
                }
                Ok(bytes)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            label: METADATA_LABEL,
            chunks: decoded,
        })
    }

    #[must_use]
    pub const fn label(&self) -> u64 {
        self.label
    }

    #[must_use]
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// The reassembled payload as lowercase hex.
    #[must_use]
    pub fn payload_hex(&self) -> String {
        self.chunks.iter().map(hex::encode).collect()
    }

    /// Encode as a one-entry CBOR map `{label: [bytes, ...]}`.
    #[must_use]
    pub fn to_cbor_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_head(&mut buf, MajorType::Map, 1);
        write_head(&mut buf, MajorType::UnsignedInt, self.label);
        write_head(&mut buf, MajorType::Array, self.chunks.len() as u64);
        for chunk in &self.chunks {
            write_byte_string(&mut buf, chunk);
        }
        buf
    }

    #[must_use]
    pub fn to_cbor_hex(&self) -> String {
        hex::encode(self.to_cbor_bytes())
    }
}
