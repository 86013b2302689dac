//! Resolution policy types.

use crate::error::ResolveError;

/// Pass budget used when the caller does not choose one.
pub const DEFAULT_MAX_PASSES: u32 = 10;

/// Budget configuration for the dependency resolution engine.
///
/// The pass budget is the only liveness guarantee: there are no timeouts and
/// no cancellation. A reference cycle consumes the whole budget and is
/// reported as non-convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Hard cap on full passes over the validator set.
    pub max_passes: u32,
}

impl ResolutionPolicy {
    /// Validate that the policy can run at least one pass.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidPolicy`] if `max_passes` is zero.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.max_passes == 0 {
            return Err(ResolveError::InvalidPolicy {
                detail: "max_passes must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}
