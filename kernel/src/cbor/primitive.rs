//! Primitive codec: unsigned/negative integers and byte strings.
//!
//! # Framing rules (RFC 8949 §3)
//!
//! | Argument value        | Head bytes                         |
//! |-----------------------|------------------------------------|
//! | 0..=23                | 1 byte: `major << 5 \| value`      |
//! | 24..=0xff             | 2 bytes: `major << 5 \| 24`, u8    |
//! | 0x100..=0xffff        | 3 bytes: `major << 5 \| 25`, u16be |
//! | 0x1_0000..=0xffff_ffff| 5 bytes: `major << 5 \| 26`, u32be |
//! | larger                | 9 bytes: `major << 5 \| 27`, u64be |
//!
//! The smallest head that fits is always chosen. Negative integers carry
//! `-1 - n` under major type 1. Byte strings carry their length under major
//! type 2 followed by the raw bytes. This module never emits the
//! indefinite-length (streaming) form.

use crate::cbor::hex_input::decode_hex;
use crate::error::CodecError;

/// CBOR major type (top three bits of the initial byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MajorType {
    UnsignedInt = 0,
    NegativeInt = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl MajorType {
    /// Major type encoded in the top three bits of `byte`.
    #[must_use]
    pub const fn from_initial_byte(byte: u8) -> Self {
        match byte >> 5 {
            0 => Self::UnsignedInt,
            1 => Self::NegativeInt,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }

    /// Initial byte for this major type with the given additional information.
    #[must_use]
    pub const fn initial_byte(self, additional: u8) -> u8 {
        ((self as u8) << 5) | (additional & 0x1f)
    }
}

/// Additional-information value that marks an indefinite-length item.
pub const INDEFINITE: u8 = 31;

/// Terminator for indefinite-length items.
pub const BREAK: u8 = 0xff;

/// Append the shortest head for `(major, value)` to `buf`.
pub fn write_head(buf: &mut Vec<u8>, major: MajorType, value: u64) {
    if value < 24 {
        buf.push(major.initial_byte(value.to_be_bytes()[7]));
    } else if let Ok(v) = u8::try_from(value) {
        buf.push(major.initial_byte(24));
        buf.push(v);
    } else if let Ok(v) = u16::try_from(value) {
        buf.push(major.initial_byte(25));
        buf.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(value) {
        buf.push(major.initial_byte(26));
        buf.extend_from_slice(&v.to_be_bytes());
    } else {
        buf.push(major.initial_byte(27));
        buf.extend_from_slice(&value.to_be_bytes());
    }
}

/// Append a definite-length byte string.
pub fn write_byte_string(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_head(buf, MajorType::ByteString, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Canonical hex encoding of an unsigned integer (major type 0).
#[must_use]
pub fn encode_unsigned_int(n: u64) -> String {
    let mut buf = Vec::with_capacity(9);
    write_head(&mut buf, MajorType::UnsignedInt, n);
    hex::encode(buf)
}

/// Canonical hex encoding of a signed integer.
///
/// Non-negative values use major type 0; negative values use major type 1
/// with magnitude `|n| - 1`.
#[must_use]
pub fn encode_signed_int(n: i64) -> String {
    let mut buf = Vec::with_capacity(9);
    match u64::try_from(n) {
        Ok(unsigned) => write_head(&mut buf, MajorType::UnsignedInt, unsigned),
        Err(_) => write_head(&mut buf, MajorType::NegativeInt, n.unsigned_abs() - 1),
    }
    hex::encode(buf)
}

/// Canonical hex encoding of any integer CBOR majors 0/1 can carry
/// (`-2^64 ..= 2^64 - 1`).
///
/// # Errors
///
/// Returns [`CodecError::MalformedInteger`] if `value` is outside that range.
/// Bignum tags are not produced.
pub fn encode_integer(value: i128) -> Result<String, CodecError> {
    let (major, argument) = if value >= 0 {
        (MajorType::UnsignedInt, u64::try_from(value))
    } else {
        (MajorType::NegativeInt, u64::try_from(-1 - value))
    };
    let argument = argument.map_err(|_| CodecError::MalformedInteger {
        raw: value.to_string(),
        reason: "magnitude exceeds 64 bits",
    })?;
    let mut buf = Vec::with_capacity(9);
    write_head(&mut buf, major, argument);
    Ok(hex::encode(buf))
}

/// Parse a base-10 integer literal (optional sign, surrounding whitespace allowed).
///
/// # Errors
///
/// Returns [`CodecError::MalformedInteger`] for empty input, fractional or
/// exponent notation, stray characters, or values that overflow `i128`.
pub fn parse_integer(raw: &str) -> Result<i128, CodecError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(CodecError::MalformedInteger {
            raw: raw.to_string(),
            reason: "no digits",
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::MalformedInteger {
            raw: raw.to_string(),
            reason: "not a base-10 integer",
        });
    }
    trimmed
        .parse::<i128>()
        .map_err(|_| CodecError::MalformedInteger {
            raw: raw.to_string(),
            reason: "out of range",
        })
}

/// Canonical hex encoding of a byte string (major type 2, definite length).
#[must_use]
pub fn encode_byte_string(bytes: &[u8]) -> String {
    let mut buf = Vec::with_capacity(bytes.len() + 9);
    write_byte_string(&mut buf, bytes);
    hex::encode(buf)
}

/// Canonical hex encoding of a byte string given as hex.
///
/// The input may carry a `0x` prefix and whitespace. An empty input encodes
/// the empty byte string (`40`).
///
/// # Errors
///
/// Returns [`CodecError::MalformedHex`] on odd length or non-hex characters.
pub fn encode_byte_string_hex(hex_bytes: &str) -> Result<String, CodecError> {
    let bytes = decode_hex(hex_bytes)?;
    Ok(encode_byte_string(&bytes))
}

/// Check that `bytes` opens with a usable CBOR data item and return its major type.
///
/// Accepted leading bytes are major types 0 through 6 with a definite
/// argument, plus the indefinite-length forms of byte strings, text strings,
/// arrays and maps. Simple values and floats (major type 7), the reserved
/// additional-information values 28..=30, and indefinite integers or tags are
/// rejected. This is a shape check on the first byte only, not a decoder.
///
/// # Errors
///
/// Returns [`CodecError::UnrecognizedBinaryShape`] when the leading byte fails
/// the check. Empty input is reported with `leading_byte` set to [`BREAK`].
pub fn leading_major_type(bytes: &[u8]) -> Result<MajorType, CodecError> {
    let Some(&first) = bytes.first() else {
        return Err(CodecError::UnrecognizedBinaryShape { leading_byte: BREAK });
    };
    let major = MajorType::from_initial_byte(first);
    let additional = first & 0x1f;
    let rejected = matches!(
        (major, additional),
        (MajorType::Simple, _)
            | (_, 28..=30)
            | (MajorType::UnsignedInt | MajorType::NegativeInt | MajorType::Tag, INDEFINITE)
    );
    if !rejected {
        Ok(major)
    } else {
        Err(CodecError::UnrecognizedBinaryShape {
            leading_byte: first,
        })
    }
}
