//! Typed resolve errors.
//!
//! [`ParamError`] is local to one parameter slot and never escapes the
//! per-validator step of the engine. [`ResolveError`] represents pre-flight
//! failures only: runtime problems (encoding failures, missing references,
//! budget exhaustion) are soft and reported through
//! [`crate::engine::ResolutionOutcome`].

use attest_kernel::error::CodecError;
use thiserror::Error;

use crate::validator::ValidatorId;

/// Failure encoding a single parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The slot has no value and no reference.
    #[error("parameter value is required")]
    MissingValue,

    /// The value could not be encoded under its classification.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Typed failure for pre-flight resolution validation.
///
/// Returned before the first pass. No state is produced because no pass ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The policy is unusable (for example a zero pass budget).
    #[error("invalid resolution policy: {detail}")]
    InvalidPolicy { detail: String },

    /// Two validators share one identity.
    #[error("validator {id} is loaded more than once")]
    DuplicateValidator { id: ValidatorId },

    /// Inputs were supplied for a validator that is not loaded.
    #[error("parameter inputs supplied for unknown validator {id}")]
    UnknownValidator { id: ValidatorId },

    /// More inputs than the validator declares parameter slots.
    #[error("validator {id} declares {expected} parameters but {actual} inputs were supplied")]
    ArityMismatch {
        id: ValidatorId,
        expected: usize,
        actual: usize,
    },
}
