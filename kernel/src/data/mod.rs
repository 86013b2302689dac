//! Plutus data: the tagged product/sum framing the registry backend decodes.
//!
//! Depends on `cbor` only.

pub mod plutus;
