//! Deterministic stand-in for the apply-parameters-and-hash primitive.
//!
//! The real primitive applies UPLC arguments and hashes the script. Lock tests
//! only need something deterministic and sensitive to every input, so this
//! hashes `version | code | params` with SHA-256 and keeps 28 bytes.

use attest_kernel::script::hash::{ScriptHash, SCRIPT_HASH_LEN};
use attest_kernel::script::version::PlutusVersion;
use attest_resolve::contract::{ParameterizeError, ScriptParameterizer};
use sha2::{Digest, Sha256};

/// SHA-256 based parameterizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Parameterizer;

impl Sha256Parameterizer {
    /// The hash this parameterizer reports for the given inputs.
    #[must_use]
    pub fn hash(compiled_code: &str, params: &[String], version: PlutusVersion) -> ScriptHash {
        let mut h = Sha256::new();
        h.update(version.as_str());
        h.update(b"|");
        h.update(compiled_code);
        for p in params {
            h.update(b"|");
            h.update(p);
        }
        let digest = h.finalize();
        let mut bytes = [0u8; SCRIPT_HASH_LEN];
        bytes.copy_from_slice(&digest[..SCRIPT_HASH_LEN]);
        ScriptHash::from_bytes(bytes)
    }
}

impl ScriptParameterizer for Sha256Parameterizer {
    fn apply_parameters_and_hash(
        &self,
        compiled_code: &str,
        params: &[String],
        version: PlutusVersion,
    ) -> Result<String, ParameterizeError> {
        if compiled_code.is_empty() {
            return Err(ParameterizeError::new("empty compiled code"));
        }
        Ok(Self::hash(compiled_code, params, version).to_hex())
    }
}
