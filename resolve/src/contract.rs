//! External parameterization primitive.

use attest_kernel::script::version::PlutusVersion;
use thiserror::Error;

/// Failure reported by a [`ScriptParameterizer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameterization failed: {message}")]
pub struct ParameterizeError {
    pub message: String,
}

impl ParameterizeError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Applies encoded parameters to a compiled script and hashes the result.
///
/// # Contract
///
/// - `params` are canonical CBOR hex values, in slot order.
/// - The returned string is the hex script hash of the parameterized script.
///   The engine checks its length; implementations need not.
/// - Must be deterministic: same `(compiled_code, params, version)` → same hash.
/// - Calls within one pass are independent of each other.
pub trait ScriptParameterizer {
    /// Apply `params` to `compiled_code` and return the resulting script hash.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterizeError`] if the script cannot be parameterized.
    fn apply_parameters_and_hash(
        &self,
        compiled_code: &str,
        params: &[String],
        version: PlutusVersion,
    ) -> Result<String, ParameterizeError>;
}
