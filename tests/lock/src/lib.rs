//! Shared support for the lock tests and their fixture binaries.

pub mod fixtures;
pub mod parameterizer;
