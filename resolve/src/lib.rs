//! Attest Resolve: parameter encoding and inter-validator dependency resolution.
//!
//! Depends only on `attest_kernel`. It does NOT read blueprints or build
//! submissions; that is `attest_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! attest_kernel  ←  attest_resolve  ←  attest_harness
//! (cbor, metadata)   (schemas, engine)    (blueprint, submission, cli)
//! ```
//!
//! # Key types
//!
//! - [`SchemaType`] -- closed union of blueprint parameter shapes
//! - [`Classification`] -- how a parameter slot's raw input is encoded
//! - [`ParameterValue`] -- one slot's user input (literal or reference)
//! - [`Validator`] -- an immutable compiled validator loaded from a blueprint
//! - [`ScriptParameterizer`] -- the external apply-and-hash primitive
//! - [`ResolutionState`] -- validator identity to current best-known hash
//! - [`ResolutionOutcome`] -- result of a bounded fixed-point run
//!
//! [`SchemaType`]: schema::SchemaType
//! [`Classification`]: classify::Classification
//! [`ParameterValue`]: input::ParameterValue
//! [`Validator`]: validator::Validator
//! [`ScriptParameterizer`]: contract::ScriptParameterizer
//! [`ResolutionState`]: state::ResolutionState
//! [`ResolutionOutcome`]: engine::ResolutionOutcome

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod contract;
pub mod encode;
pub mod engine;
pub mod error;
pub mod input;
pub mod policy;
pub mod schema;
pub mod state;
pub mod validator;
