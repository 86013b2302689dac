//! Typed kernel errors.
//!
//! [`CodecError`] covers single values (integers, hex, script hashes).
//! [`MetadataError`] covers the container, chunker and envelope; every variant
//! is fatal for the submission that produced it.

use thiserror::Error;

/// What was wrong with a hex input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexFault {
    /// Nothing left after stripping the `0x` prefix and whitespace.
    #[error("empty input")]
    Empty,
    /// Odd number of hex digits (cannot form whole bytes).
    #[error("odd number of hex digits ({len})")]
    OddLength { len: usize },
    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// Failure encoding or validating a single value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Not a base-10 integer, or outside the range CBOR major types 0/1 can carry.
    #[error("malformed integer {raw:?}: {reason}")]
    MalformedInteger { raw: String, reason: &'static str },

    /// Odd length or non-hex characters.
    #[error("malformed hex: {fault}")]
    MalformedHex { fault: HexFault },

    /// A value that must be a 28-byte script hash has the wrong length.
    #[error("expected {expected} hex characters for a script hash, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },

    /// Opaque input whose leading byte is not a usable CBOR initial byte.
    #[error(
        "value does not look like canonical CBOR (leading byte {leading_byte:#04x}); \
         supply complex values in passthrough mode"
    )]
    UnrecognizedBinaryShape { leading_byte: u8 },
}

/// Failure building, chunking or enveloping verification metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The commit reference is not well-formed hex.
    #[error("commit reference is not valid hex")]
    MalformedCommit(#[source] CodecError),

    /// A parameter-map key is not a 28-byte script hash.
    #[error("parameter map key {key:?} is not a script hash")]
    InvalidScriptHash {
        key: String,
        #[source]
        source: CodecError,
    },

    /// Two keys name the same script hash (they differ only by case).
    #[error("script hash {key} appears more than once in the parameter map")]
    DuplicateScriptHash { key: String },

    /// A parameter value is not hex and cannot be embedded.
    #[error("parameter {index} of script {script_hash} is not valid hex")]
    MalformedParameter {
        script_hash: String,
        index: usize,
        #[source]
        source: CodecError,
    },

    /// Chunk size must be a positive, even number of hex characters.
    #[error("chunk size must be a positive even number of hex characters, got {size}")]
    InvalidChunkSize { size: usize },

    /// A chunk handed to the envelope is not valid hex.
    #[error("chunk {index} is not valid hex")]
    MalformedChunk {
        index: usize,
        #[source]
        source: CodecError,
    },

    /// A chunk exceeds the per-entry byte ceiling of the transport layer.
    #[error("chunk {index} is {len} bytes; the ceiling is {max}")]
    ChunkTooLarge { index: usize, len: usize, max: usize },
}
