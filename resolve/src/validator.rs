//! Validator identity and the immutable validator record.

use std::collections::BTreeSet;
use std::fmt;

use attest_kernel::script::hash::ScriptHash;
use attest_kernel::script::version::PlutusVersion;

use crate::schema::ParameterSchema;

/// Unique key of a validator: `(module, name)`.
///
/// Ordering is lexicographic on module then name, which fixes the order the
/// engine visits validators in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorId {
    pub module: String,
    pub name: String,
}

impl ValidatorId {
    #[must_use]
    pub fn new(module: &str, name: &str) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// A compiled validator as loaded from a build artifact.
///
/// Immutable after loading. `unparameterized_hash` is the hash of
/// `compiled_code` with no parameters applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub id: ValidatorId,
    pub purposes: BTreeSet<String>,
    pub parameters: Vec<ParameterSchema>,
    /// CBOR hex of the compiled script.
    pub compiled_code: String,
    pub plutus_version: PlutusVersion,
    pub unparameterized_hash: ScriptHash,
}

impl Validator {
    /// Whether the validator declares any parameter slots.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.parameters.is_empty()
    }
}
