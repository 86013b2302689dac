//! Hex normalisation for user- and fixture-supplied byte strings.
//!
//! Accepted input: optional leading `0x`/`0X`, arbitrary ASCII whitespace
//! anywhere, upper- or lowercase digits. Output is always lowercase with no
//! prefix and no separators, the only hex form the kernel emits.

use crate::error::{CodecError, HexFault};

/// Strip an optional `0x` prefix and all whitespace.
///
/// Performs no validation; see [`normalize_hex`] for that.
#[must_use]
pub fn strip_hex(input: &str) -> String {
    let trimmed = input.trim_start();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalise and validate a hex string, returning lowercase digits.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHex`] if the stripped input is empty, has an
/// odd number of digits, or contains a non-hex character.
pub fn normalize_hex(input: &str) -> Result<String, CodecError> {
    let stripped = strip_hex(input);
    if stripped.is_empty() {
        return Err(CodecError::MalformedHex {
            fault: HexFault::Empty,
        });
    }
    check_digits(&stripped)?;
    Ok(stripped.to_ascii_lowercase())
}

/// Decode a hex string into bytes after normalisation.
///
/// An empty input decodes to an empty vector; callers that require a value
/// check for emptiness themselves.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHex`] on odd length or non-hex characters.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, CodecError> {
    let stripped = strip_hex(input);
    ::hex::decode(&stripped).map_err(|e| CodecError::MalformedHex {
        fault: fault_from(&e, stripped.len()),
    })
}

/// Validate that `digits` (already stripped) is an even-length run of hex digits.
fn check_digits(digits: &str) -> Result<(), CodecError> {
    if let Some((index, ch)) = digits
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(CodecError::MalformedHex {
            fault: HexFault::InvalidCharacter { ch, index },
        });
    }
    if digits.len() % 2 != 0 {
        return Err(CodecError::MalformedHex {
            fault: HexFault::OddLength { len: digits.len() },
        });
    }
    Ok(())
}

fn fault_from(err: &::hex::FromHexError, len: usize) -> HexFault {
    match *err {
        ::hex::FromHexError::InvalidHexCharacter { c, index } => {
            HexFault::InvalidCharacter { ch: c, index }
        }
        _ => HexFault::OddLength { len },
    }
}
