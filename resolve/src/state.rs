//! Resolution state: validator identity → current best-known hash.

use std::collections::BTreeMap;

use attest_kernel::script::hash::ScriptHash;

use crate::validator::{Validator, ValidatorId};

/// Current hash of every validator in one resolution run.
///
/// Owned by exactly one run. Seeded from unparameterized hashes and only
/// updated by the engine, one committed pass at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionState {
    hashes: BTreeMap<ValidatorId, ScriptHash>,
}

impl ResolutionState {
    /// Seed every validator with its unparameterized hash.
    #[must_use]
    pub fn seeded(validators: &[Validator]) -> Self {
        Self {
            hashes: validators
                .iter()
                .map(|v| (v.id.clone(), v.unparameterized_hash))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &ValidatorId) -> Option<&ScriptHash> {
        self.hashes.get(id)
    }

    /// Record `hash` for `id`. Returns `true` if the value changed.
    pub fn set(&mut self, id: &ValidatorId, hash: ScriptHash) -> bool {
        match self.hashes.get_mut(id) {
            Some(current) if *current == hash => false,
            Some(current) => {
                *current = hash;
                true
            }
            None => {
                self.hashes.insert(id.clone(), hash);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ValidatorId, &ScriptHash)> {
        self.hashes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
