//! Dependency resolution engine.
//!
//! Computes final script hashes for validators whose parameters may name
//! other validators' hashes. References are not resolved up front; the
//! engine runs bounded passes until nothing changes:
//!
//! ```text
//! state := unparameterized hashes
//! order := referenced validators before the validators that reference them
//! repeat up to max_passes:
//!     for each validator with configured inputs, in order:
//!         resolve every slot against the current state
//!         if all slots resolve: state[v] := parameterize(code, params, version)
//!     stop if no hash changed
//! ```
//!
//! Slots read the state as it stands when their validator is visited, so a
//! hash computed earlier in a pass is visible to later validators of the
//! same pass. The visit order is derived from validator ids and reference
//! edges only, never from the order of the input slice, so the outcome is
//! independent of how callers list validators. Any acyclic reference graph
//! settles in at most two passes (the second confirms nothing moved). A
//! cycle never settles and is reported as
//! [`TerminationReason::PassBudgetExhausted`], never as an error.
//!
//! Failures of one validator (bad input, missing reference, parameterizer
//! error) leave its previous hash in place and are reported as
//! [`ResolutionWarning`]s keyed by validator. Other validators are unaffected.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use attest_kernel::cbor::hex_input::strip_hex;
use attest_kernel::script::hash::{ScriptHash, SCRIPT_HASH_HEX_LEN};

use crate::classify::{classify, expects_script_hash, Classification};
use crate::contract::{ParameterizeError, ScriptParameterizer};
use crate::encode::{encode_parameter, InputMode};
use crate::error::{ParamError, ResolveError};
use crate::input::{ParameterValue, ValidatorInputs};
use crate::policy::ResolutionPolicy;
use crate::state::ResolutionState;
use crate::validator::{Validator, ValidatorId};

/// Why the pass loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A full pass changed nothing.
    Converged,
    /// The budget ran out while hashes were still changing.
    PassBudgetExhausted { max_passes: u32 },
}

/// A soft, per-validator problem from the most recent pass that visited it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// A literal slot could not be encoded.
    EncodingFailed { slot: usize, error: ParamError },
    /// A reference slot names a validator with no known hash.
    UnresolvedReference { slot: usize, target: ValidatorId },
    /// Some slots have neither a value nor a reference.
    IncompleteParameters { missing: Vec<usize> },
    /// A hash-typed byte-array slot is not 28 bytes. The value is still used.
    HashLength { slot: usize, hex_len: usize },
    /// The parameterizer failed or returned something that is not a script hash.
    ParameterizationFailed { error: ParameterizeError },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodingFailed { slot, error } => write!(f, "parameter {slot}: {error}"),
            Self::UnresolvedReference { slot, target } => {
                write!(f, "parameter {slot}: reference to {target} never resolved")
            }
            Self::IncompleteParameters { missing } => {
                write!(f, "parameters {missing:?} have no value")
            }
            Self::HashLength { slot, hex_len } => write!(
                f,
                "parameter {slot}: expected {SCRIPT_HASH_HEX_LEN} hex characters for a hash, got {hex_len}"
            ),
            Self::ParameterizationFailed { error } => write!(f, "{error}"),
        }
    }
}

/// Result of a resolution run.
///
/// Always carries the best-known state, whether or not the run converged.
/// Whether partial results are good enough is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub state: ResolutionState,
    pub termination: TerminationReason,
    pub passes_used: u32,
    /// Warnings from the last pass that visited each validator.
    pub warnings: BTreeMap<ValidatorId, Vec<ResolutionWarning>>,
    /// Encoded parameter list behind each validator's current hash, for
    /// validators whose every slot resolved.
    pub resolved_params: BTreeMap<ValidatorId, Vec<String>>,
}

impl ResolutionOutcome {
    /// Returns `true` if the last pass changed nothing.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination == TerminationReason::Converged
    }

    /// Current hash of `id`.
    #[must_use]
    pub fn hash_of(&self, id: &ValidatorId) -> Option<&ScriptHash> {
        self.state.get(id)
    }

    /// Whether every slot of `id` resolved and was applied.
    #[must_use]
    pub fn is_fully_resolved(&self, id: &ValidatorId) -> bool {
        self.resolved_params.contains_key(id)
    }
}

/// Run the pass loop.
///
/// `inputs` maps validators to their slot inputs. Validators with no entry,
/// or whose entries are all blank, keep their unparameterized hash and are
/// never handed to the parameterizer.
///
/// # Errors
///
/// Pre-flight only:
/// - [`ResolveError::InvalidPolicy`] for a zero pass budget.
/// - [`ResolveError::DuplicateValidator`] if two validators share an id.
/// - [`ResolveError::UnknownValidator`] if `inputs` names an unloaded validator.
/// - [`ResolveError::ArityMismatch`] if a validator gets more inputs than slots.
pub fn resolve<P: ScriptParameterizer + ?Sized>(
    validators: &[Validator],
    inputs: &ValidatorInputs,
    parameterizer: &P,
    policy: &ResolutionPolicy,
) -> Result<ResolutionOutcome, ResolveError> {
    preflight(validators, inputs, policy)?;

    let mut state = ResolutionState::seeded(validators);
    let mut warnings: BTreeMap<ValidatorId, Vec<ResolutionWarning>> = BTreeMap::new();
    let mut resolved_params: BTreeMap<ValidatorId, Vec<String>> = BTreeMap::new();
    let mut passes_used = 0;
    let mut termination = TerminationReason::PassBudgetExhausted {
        max_passes: policy.max_passes,
    };

    let order = visit_order(validators, inputs);

    while passes_used < policy.max_passes {
        passes_used += 1;
        let mut changed = 0usize;

        for validator in &order {
            let Some(slots) = inputs.get(&validator.id) else {
                continue;
            };
            if !slots.iter().any(ParameterValue::is_set) {
                continue;
            }
            let step = resolve_validator(validator, slots, &state, parameterizer);
            for w in &step.warnings {
                tracing::warn!(validator = %validator.id, pass = passes_used, "{w}");
            }
            warnings.insert(validator.id.clone(), step.warnings);
            if let Some((params, hash)) = step.applied {
                resolved_params.insert(validator.id.clone(), params);
                if state.set(&validator.id, hash) {
                    tracing::debug!(validator = %validator.id, hash = %hash, pass = passes_used, "hash updated");
                    changed += 1;
                }
            }
        }
        tracing::debug!(pass = passes_used, changed, "resolution pass complete");

        if changed == 0 {
            termination = TerminationReason::Converged;
            break;
        }
    }

    warnings.retain(|_, w| !w.is_empty());
    if termination == TerminationReason::Converged {
        tracing::info!(passes = passes_used, validators = validators.len(), "resolution converged");
    } else {
        tracing::warn!(
            passes = passes_used,
            "resolution did not converge within the pass budget; reporting best-known hashes"
        );
    }

    Ok(ResolutionOutcome {
        state,
        termination,
        passes_used,
        warnings,
        resolved_params,
    })
}

/// Validators ordered so that every reference target comes before the
/// validators that reference it.
///
/// Ready validators are taken in id order. Members of a reference cycle have
/// no valid position and are appended in id order after everything else.
fn visit_order<'a>(validators: &'a [Validator], inputs: &ValidatorInputs) -> Vec<&'a Validator> {
    let by_id: BTreeMap<&ValidatorId, &Validator> =
        validators.iter().map(|v| (&v.id, v)).collect();

    let mut pending: BTreeMap<&ValidatorId, usize> = by_id.keys().map(|id| (*id, 0)).collect();
    let mut dependents: BTreeMap<&ValidatorId, Vec<&ValidatorId>> = BTreeMap::new();
    for (id, slots) in inputs {
        let Some((&id, _)) = by_id.get_key_value(id) else {
            continue;
        };
        let targets: BTreeSet<&ValidatorId> = slots
            .iter()
            .filter_map(|slot| slot.reference.as_ref())
            .filter(|target| *target != id)
            .filter_map(|target| by_id.get_key_value(target).map(|(k, _)| *k))
            .collect();
        for target in targets {
            dependents.entry(target).or_default().push(id);
            if let Some(count) = pending.get_mut(id) {
                *count += 1;
            }
        }
    }

    let mut ready: BTreeSet<&ValidatorId> = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut order = Vec::with_capacity(validators.len());
    while let Some(id) = ready.pop_first() {
        pending.remove(id);
        order.push(by_id[id]);
        for dependent in dependents.get(id).into_iter().flatten() {
            if let Some(count) = pending.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.insert(*dependent);
                }
            }
        }
    }
    // Whatever is still pending sits on a cycle.
    order.extend(pending.keys().map(|id| by_id[id]));
    order
}

fn preflight(
    validators: &[Validator],
    inputs: &ValidatorInputs,
    policy: &ResolutionPolicy,
) -> Result<(), ResolveError> {
    policy.validate()?;

    let mut seen = BTreeSet::new();
    for v in validators {
        if !seen.insert(&v.id) {
            return Err(ResolveError::DuplicateValidator { id: v.id.clone() });
        }
    }
    for (id, slots) in inputs {
        let Some(v) = validators.iter().find(|v| &v.id == id) else {
            return Err(ResolveError::UnknownValidator { id: id.clone() });
        };
        if slots.len() > v.parameters.len() {
            return Err(ResolveError::ArityMismatch {
                id: id.clone(),
                expected: v.parameters.len(),
                actual: slots.len(),
            });
        }
    }
    Ok(())
}

struct Step {
    applied: Option<(Vec<String>, ScriptHash)>,
    warnings: Vec<ResolutionWarning>,
}

fn resolve_validator<P: ScriptParameterizer + ?Sized>(
    validator: &Validator,
    slots: &[ParameterValue],
    state: &ResolutionState,
    parameterizer: &P,
) -> Step {
    let mut warnings = Vec::new();
    let mut missing = Vec::new();
    let mut blocked = false;
    let mut params = Vec::with_capacity(validator.parameters.len());

    for (slot, schema) in validator.parameters.iter().enumerate() {
        let Some(value) = slots.get(slot).filter(|v| v.is_set()) else {
            missing.push(slot);
            continue;
        };

        if let Some(target) = &value.reference {
            match state.get(target) {
                Some(hash) => params.push(hash.to_parameter_cbor()),
                None => {
                    warnings.push(ResolutionWarning::UnresolvedReference {
                        slot,
                        target: target.clone(),
                    });
                    blocked = true;
                }
            }
            continue;
        }

        let classification = classify(&schema.schema);
        match encode_parameter(&value.raw, classification, value.mode) {
            Ok(cbor) => {
                if value.mode == InputMode::Auto
                    && classification == Classification::ByteArray
                    && expects_script_hash(&schema.schema)
                {
                    let hex_len = strip_hex(&value.raw).len();
                    if hex_len != SCRIPT_HASH_HEX_LEN {
                        warnings.push(ResolutionWarning::HashLength { slot, hex_len });
                    }
                }
                params.push(cbor);
            }
            Err(error) => {
                warnings.push(ResolutionWarning::EncodingFailed { slot, error });
                blocked = true;
            }
        }
    }

    if !missing.is_empty() {
        warnings.push(ResolutionWarning::IncompleteParameters { missing });
        blocked = true;
    }
    if blocked {
        return Step {
            applied: None,
            warnings,
        };
    }

    let hashed = parameterizer
        .apply_parameters_and_hash(&validator.compiled_code, &params, validator.plutus_version)
        .and_then(|hex| {
            ScriptHash::parse(&hex).map_err(|e| ParameterizeError::new(format!("returned hash {hex:?}: {e}")))
        });
    match hashed {
        Ok(hash) => Step {
            applied: Some((params, hash)),
            warnings,
        },
        Err(error) => {
            warnings.push(ResolutionWarning::ParameterizationFailed { error });
            Step {
                applied: None,
                warnings,
            }
        }
    }
}
