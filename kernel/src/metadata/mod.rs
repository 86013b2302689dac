//! Verification metadata: model, canonical encoder, chunker, transport envelope.
//!
//! Depends on `cbor`, `data` and `script`. Nothing in the kernel depends on
//! `metadata`.

pub mod chunk;
pub mod encode;
pub mod envelope;
pub mod request;
