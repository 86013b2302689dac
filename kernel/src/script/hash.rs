//! `ScriptHash`: a 28-byte script identity hash.
//!
//! Every hash that appears as a metadata map key or as a resolved reference
//! target is one of these. Parsing never pads or truncates: anything other
//! than exactly 56 hex digits is rejected with
//! [`CodecError::InvalidHashLength`].

use std::fmt;
use std::str::FromStr;

use crate::cbor::hex_input::{decode_hex, strip_hex};
use crate::cbor::primitive::encode_byte_string;
use crate::error::CodecError;

/// Script hash length in bytes.
pub const SCRIPT_HASH_LEN: usize = 28;

/// Script hash length in hex characters.
pub const SCRIPT_HASH_HEX_LEN: usize = SCRIPT_HASH_LEN * 2;

/// A 28-byte script hash.
///
/// Derives `Ord` (byte order) so it can key a `BTreeMap`. Byte order and
/// lowercase-hex string order agree, so sorting either way yields the same
/// canonical sequence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptHash([u8; SCRIPT_HASH_LEN]);

impl ScriptHash {
    /// Construct from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SCRIPT_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from hex (optional `0x` prefix and whitespace tolerated).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHashLength`] unless the stripped input is
    /// exactly 56 characters, and [`CodecError::MalformedHex`] if those
    /// characters are not hex.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        let stripped = strip_hex(input);
        if stripped.len() != SCRIPT_HASH_HEX_LEN {
            return Err(CodecError::InvalidHashLength {
                expected: SCRIPT_HASH_HEX_LEN,
                actual: stripped.len(),
            });
        }
        let bytes = decode_hex(&stripped)?;
        let mut out = [0u8; SCRIPT_HASH_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SCRIPT_HASH_LEN] {
        &self.0
    }

    /// Lowercase hex, 56 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The hash as a parameter value: a canonical CBOR byte string (`581c…`).
    #[must_use]
    pub fn to_parameter_cbor(&self) -> String {
        encode_byte_string(&self.0)
    }
}

impl FromStr for ScriptHash {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptHash({})", self.to_hex())
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
