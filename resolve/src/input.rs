//! Per-slot parameter inputs.

use std::collections::BTreeMap;

use crate::encode::InputMode;
use crate::validator::ValidatorId;

/// The user's input for one parameter slot.
///
/// A slot is either a literal (`raw`, encoded per `mode`) or a reference to
/// another validator, in which case the referenced validator's current hash is
/// used and `raw` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValue {
    pub raw: String,
    pub mode: InputMode,
    pub reference: Option<ValidatorId>,
}

impl ParameterValue {
    /// Literal encoded by schema.
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            ..Self::default()
        }
    }

    /// Literal that is already canonical CBOR hex.
    #[must_use]
    pub fn passthrough(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            mode: InputMode::Passthrough,
            reference: None,
        }
    }

    /// Use `target`'s current hash.
    #[must_use]
    pub fn reference(target: ValidatorId) -> Self {
        Self {
            reference: Some(target),
            ..Self::default()
        }
    }

    /// Whether the slot has anything configured.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.reference.is_some() || !self.raw.trim().is_empty()
    }
}

/// Inputs for every validator that has any, in slot order.
pub type ValidatorInputs = BTreeMap<ValidatorId, Vec<ParameterValue>>;
