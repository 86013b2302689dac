//! Chunker: split an encoded hex string into transport-sized pieces.
//!
//! Transaction metadata caps each byte string at 64 bytes, which is 128 hex
//! characters. The chunker is a pure string split: the last chunk holds the
//! remainder and concatenating the chunks reproduces the input exactly.

use crate::data::plutus::MAX_BYTES_CHUNK;
use crate::error::MetadataError;

/// Default chunk width in hex characters (64 bytes).
pub const DEFAULT_CHUNK_HEX_CHARS: usize = MAX_BYTES_CHUNK * 2;

/// Chunk-width configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Hex characters per chunk. Must be positive and even.
    pub chunk_hex_chars: usize,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            chunk_hex_chars: DEFAULT_CHUNK_HEX_CHARS,
        }
    }
}

impl ChunkPolicy {
    /// Reject a width that is zero or would split a byte.
    ///
    /// # Errors
    ///
    /// [`MetadataError::InvalidChunkSize`] for zero or odd widths.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.chunk_hex_chars == 0 || self.chunk_hex_chars % 2 != 0 {
            return Err(MetadataError::InvalidChunkSize {
                size: self.chunk_hex_chars,
            });
        }
        Ok(())
    }

    /// Bytes per chunk once decoded.
    #[must_use]
    pub const fn max_chunk_bytes(&self) -> usize {
        self.chunk_hex_chars / 2
    }

    /// Split `hex` according to this policy.
    ///
    /// # Errors
    ///
    /// See [`chunk_hex`].
    pub fn split(&self, hex: &str) -> Result<Vec<String>, MetadataError> {
        chunk_hex(hex, self.chunk_hex_chars)
    }
}

/// Split `hex` into pieces of `chunk_size` characters.
///
/// Empty input yields no chunks. The input is not validated as hex here; the
/// envelope does that when the chunks are decoded.
///
/// # Errors
///
/// [`MetadataError::InvalidChunkSize`] if `chunk_size` is zero or odd.
pub fn chunk_hex(hex: &str, chunk_size: usize) -> Result<Vec<String>, MetadataError> {
    ChunkPolicy {
        chunk_hex_chars: chunk_size,
    }
    .validate()?;

    let chars: Vec<char> = hex.chars().collect();
    Ok(chars
        .chunks(chunk_size)
        .map(|piece| piece.iter().collect())
        .collect())
}
