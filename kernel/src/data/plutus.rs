//! `PlutusData` and its canonical CBOR writer.
//!
//! # Framing
//!
//! | Value                         | Encoding                                                   |
//! |-------------------------------|------------------------------------------------------------|
//! | `Constr` alternative 0..=6    | tag `121 + alt`, fields as a list                          |
//! | `Constr` alternative 7..=127  | tag `1280 + (alt - 7)`, fields as a list                   |
//! | `Constr` other alternatives   | tag `102`, definite array `[alt, fields-list]`             |
//! | `List` (non-empty)            | indefinite array `9f .. ff`                                |
//! | `List` (empty)                | `80`                                                       |
//! | `Map`                         | definite map, entries in the order given                   |
//! | `Bytes` (<= 64 bytes)         | definite byte string                                       |
//! | `Bytes` (> 64 bytes)          | indefinite byte string of 64-byte definite chunks `5f .. ff` |
//!
//! These are the rules the on-chain decoder and the independent encoder
//! implementation both follow. Map entry order is the caller's job: the writer
//! emits entries exactly as stored, so canonical ordering lives with whoever
//! builds the map (see [`crate::metadata::encode`]).

use crate::cbor::primitive::{write_byte_string, write_head, MajorType, BREAK, INDEFINITE};

/// Longest byte string emitted in definite form; longer ones are chunked.
pub const MAX_BYTES_CHUNK: usize = 64;

/// Tag for constructor alternatives 0..=6.
const TAG_CONSTR_SMALL: u64 = 121;
/// Tag for constructor alternatives 7..=127.
const TAG_CONSTR_MEDIUM: u64 = 1280;
/// Tag for any other constructor alternative.
const TAG_CONSTR_GENERAL: u64 = 102;

/// A Plutus data value restricted to the shapes verification metadata uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlutusData {
    /// Constructor application: a sum-type alternative with positional fields.
    Constr {
        alternative: u64,
        fields: Vec<PlutusData>,
    },
    /// Associative map, written in stored order.
    Map(Vec<(PlutusData, PlutusData)>),
    /// Ordered list.
    List(Vec<PlutusData>),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl PlutusData {
    /// Convenience constructor for UTF-8 text carried as bytes.
    #[must_use]
    pub fn utf8(text: &str) -> Self {
        Self::Bytes(text.as_bytes().to_vec())
    }

    /// Serialize to canonical CBOR bytes.
    #[must_use]
    pub fn to_cbor_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_data(&mut buf, self);
        buf
    }

    /// Serialize to lowercase canonical CBOR hex.
    #[must_use]
    pub fn to_cbor_hex(&self) -> String {
        hex::encode(self.to_cbor_bytes())
    }
}

fn write_data(buf: &mut Vec<u8>, data: &PlutusData) {
    match data {
        PlutusData::Constr {
            alternative,
            fields,
        } => write_constr(buf, *alternative, fields),
        PlutusData::Map(entries) => {
            write_head(buf, MajorType::Map, entries.len() as u64);
            for (key, value) in entries {
                write_data(buf, key);
                write_data(buf, value);
            }
        }
        PlutusData::List(items) => write_list(buf, items),
        PlutusData::Bytes(bytes) => write_bytes(buf, bytes),
    }
}

fn write_constr(buf: &mut Vec<u8>, alternative: u64, fields: &[PlutusData]) {
    match alternative {
        0..=6 => {
            write_head(buf, MajorType::Tag, TAG_CONSTR_SMALL + alternative);
            write_list(buf, fields);
        }
        7..=127 => {
            write_head(buf, MajorType::Tag, TAG_CONSTR_MEDIUM + (alternative - 7));
            write_list(buf, fields);
        }
        _ => {
            write_head(buf, MajorType::Tag, TAG_CONSTR_GENERAL);
            write_head(buf, MajorType::Array, 2);
            write_head(buf, MajorType::UnsignedInt, alternative);
            write_list(buf, fields);
        }
    }
}

fn write_list(buf: &mut Vec<u8>, items: &[PlutusData]) {
    if items.is_empty() {
        write_head(buf, MajorType::Array, 0);
        return;
    }
    buf.push(MajorType::Array.initial_byte(INDEFINITE));
    for item in items {
        write_data(buf, item);
    }
    buf.push(BREAK);
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() <= MAX_BYTES_CHUNK {
        write_byte_string(buf, bytes);
        return;
    }
    buf.push(MajorType::ByteString.initial_byte(INDEFINITE));
    for chunk in bytes.chunks(MAX_BYTES_CHUNK) {
        write_byte_string(buf, chunk);
    }
    buf.push(BREAK);
}
