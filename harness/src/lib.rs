//! Attest Harness: the layer between build artifacts and the kernel.
//!
//! The harness reads a blueprint into validators, validates where the source
//! lives, and packages a resolution outcome as chunked metadata ready for a
//! transaction (`resolve` → `metadata` → `encode` → `chunk` → `envelope`).
//!
//! The harness does NOT encode anything itself; it delegates to the kernel.
//! It never decides whether a partial resolution is good enough to submit.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod blueprint;
pub mod digest;
pub mod error;
pub mod source;
pub mod submission;
