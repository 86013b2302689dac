//! CBOR primitives: major-type framing and hex normalisation.
//!
//! Nothing in here knows about Plutus data or verification metadata; it only
//! writes heads, integers and byte strings in their shortest definite form.

pub mod hex_input;
pub mod primitive;
