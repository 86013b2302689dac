//! Parameter type resolver.
//!
//! Decides how a raw parameter input is turned into canonical CBOR. This is a
//! keyword heuristic over type names, not a type system: anything it cannot
//! place confidently is [`Classification::OpaqueBinary`] and the caller must
//! supply pre-encoded CBOR.
//!
//! | Schema                          | Classification                           |
//! |---------------------------------|------------------------------------------|
//! | `Primitive` / `Reference` name  | keyword match on the (final) name        |
//! | `ListOf`, `MapOf`, `SumOf`      | `OpaqueBinary`                           |
//! | `Any`                           | `OpaqueBinary`                           |
//!
//! Keyword match, case-insensitive, first rule wins:
//!
//! 1. contains `int` or equals `integer` → `Integer`
//! 2. contains `byte`, `hash`, `policy` or `address`, or equals `data` → `ByteArray`
//! 3. otherwise → `OpaqueBinary`

use std::fmt;

use crate::schema::{reference_name, SchemaType};

/// Encoding rule for one parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Integer,
    ByteArray,
    OpaqueBinary,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::ByteArray => "bytearray",
            Self::OpaqueBinary => "opaque",
        })
    }
}

const BYTE_KEYWORDS: [&str; 4] = ["byte", "hash", "policy", "address"];

/// Classify a schema.
#[must_use]
pub fn classify(schema: &SchemaType) -> Classification {
    match schema {
        SchemaType::Primitive(name) => classify_name(name),
        SchemaType::Reference(path) => classify_name(&reference_name(path)),
        SchemaType::ListOf(_) | SchemaType::MapOf(..) | SchemaType::SumOf(_) | SchemaType::Any => {
            Classification::OpaqueBinary
        }
    }
}

/// Classify a bare type name.
#[must_use]
pub fn classify_name(name: &str) -> Classification {
    let name = name.to_ascii_lowercase();
    if name.contains("int") || name == "integer" {
        Classification::Integer
    } else if BYTE_KEYWORDS.iter().any(|k| name.contains(k)) || name == "data" {
        Classification::ByteArray
    } else {
        Classification::OpaqueBinary
    }
}

/// Whether a byte-array slot is expected to carry a 28-byte script hash.
///
/// Only these slots get a length check (as a warning; other byte arrays have
/// arbitrary lengths).
#[must_use]
pub fn expects_script_hash(schema: &SchemaType) -> bool {
    let name = match schema {
        SchemaType::Primitive(name) => name.to_ascii_lowercase(),
        SchemaType::Reference(path) => reference_name(path).to_ascii_lowercase(),
        _ => return false,
    };
    name.contains("hash") || name.contains("policy")
}

/// Whether a parameter title suggests it takes another validator's hash.
///
/// Used to offer the reference option for a slot; it does not affect
/// encoding.
#[must_use]
pub fn is_hash_like_title(title: &str) -> bool {
    let title = title.to_ascii_lowercase();
    ["hash", "validator", "script", "policy"]
        .iter()
        .any(|k| title.contains(k))
}
