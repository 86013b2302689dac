//! Script identity: the 28-byte script hash and the Plutus language version.

pub mod hash;
pub mod version;
