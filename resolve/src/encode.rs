//! Parameter value encoder.
//!
//! Pure function from one raw input to canonical CBOR hex. Errors stay local
//! to the slot; the engine turns them into per-validator warnings.

use attest_kernel::cbor::hex_input::{decode_hex, normalize_hex};
use attest_kernel::cbor::primitive::{
    encode_byte_string_hex, encode_integer, leading_major_type, parse_integer,
};

use crate::classify::Classification;
use crate::error::ParamError;

/// How raw input is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Encode according to the slot's classification.
    #[default]
    Auto,
    /// The caller asserts the input is already canonical CBOR hex.
    Passthrough,
}

/// Encode `raw` for a slot of the given classification.
///
/// | Mode / classification  | Result                                            |
/// |------------------------|---------------------------------------------------|
/// | `Passthrough`          | the hex, validated and lowercased, unchanged      |
/// | `Integer`              | minimal CBOR integer of the base-10 value         |
/// | `ByteArray`            | CBOR byte string of the hex bytes                 |
/// | `OpaqueBinary`         | the hex, if its leading byte is a usable CBOR head |
///
/// # Errors
///
/// - [`ParamError::MissingValue`] for blank input.
/// - [`ParamError::Codec`] wrapping `MalformedInteger`, `MalformedHex` or
///   `UnrecognizedBinaryShape`.
pub fn encode_parameter(
    raw: &str,
    classification: Classification,
    mode: InputMode,
) -> Result<String, ParamError> {
    if raw.trim().is_empty() {
        return Err(ParamError::MissingValue);
    }
    let encoded = match (mode, classification) {
        (InputMode::Passthrough, _) => normalize_hex(raw)?,
        (InputMode::Auto, Classification::Integer) => encode_integer(parse_integer(raw)?)?,
        (InputMode::Auto, Classification::ByteArray) => encode_byte_string_hex(raw)?,
        (InputMode::Auto, Classification::OpaqueBinary) => {
            let hex = normalize_hex(raw)?;
            leading_major_type(&decode_hex(&hex)?)?;
            hex
        }
    };
    Ok(encoded)
}
