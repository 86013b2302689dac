//! Attest Kernel: the canonical encoding core of Attest.
//!
//! # API Surface
//!
//! The kernel exposes three entry points that callers chain together:
//!
//! - [`metadata::encode::encode_metadata`] -- encode verification metadata into canonical CBOR hex
//! - [`metadata::chunk::chunk_hex`] -- split the encoded hex into transport-sized pieces
//! - [`metadata::envelope::MetadataEnvelope`] -- attach the pieces under label 1984
//!
//! Parameter values are produced with [`cbor::primitive`] and travel through the
//! container encoder as opaque, already-canonical bytes.
//!
//! # Module Dependency Direction
//!
//! `cbor` ← `data` ← `metadata`, with `script` depending only on `cbor`.
//!
//! One-way only. No cycles. `cbor` depends on nothing internal.
//!
//! # Wire compatibility
//!
//! Every byte produced here is consumed by an independent decoder. The golden
//! vectors in `tests/fixtures/` are the contract; a change that alters any of
//! them is a protocol break, not a refactor.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cbor;
pub mod data;
pub mod error;
pub mod metadata;
pub mod script;
