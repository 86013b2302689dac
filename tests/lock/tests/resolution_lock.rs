//! End-to-end resolution lock over `blueprint_chain.json`.
//!
//! settings ← pool ← treasury: the treasury takes the pool's parameterized
//! hash, which in turn takes the settings hash. The treasury sorts after the
//! pool here, but the pool would be visited first either way. Checks pass counts, every
//! final hash, the submission map keys and run-to-run determinism.

use attest_harness::blueprint::Blueprint;
use attest_harness::submission::{build_submission, compare_hashes, SubmissionRequest};
use attest_kernel::script::hash::ScriptHash;
use attest_resolve::engine::{resolve, ResolutionOutcome, TerminationReason};
use attest_resolve::input::{ParameterValue, ValidatorInputs};
use attest_resolve::policy::ResolutionPolicy;
use attest_resolve::validator::ValidatorId;
use lock_tests::fixtures::fixture_path;
use lock_tests::parameterizer::Sha256Parameterizer;

const SETTINGS_HASH: &str = "1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5";
const POOL_HASH: &str = "b7c8d9e0f1021324354657687980a1b2c3d4e5f60718293a4b5c6d7e";
const TREASURY_HASH: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4";

fn settings() -> ValidatorId {
    ValidatorId::new("settings", "settings")
}
fn pool() -> ValidatorId {
    ValidatorId::new("pool", "pool")
}
fn treasury() -> ValidatorId {
    ValidatorId::new("treasury", "treasury")
}

fn blueprint() -> Blueprint {
    Blueprint::read(&fixture_path("blueprint_chain.json")).expect("fixture blueprint loads")
}

fn chain_inputs() -> ValidatorInputs {
    ValidatorInputs::from([
        (pool(), vec![ParameterValue::reference(settings())]),
        (
            treasury(),
            vec![
                ParameterValue::reference(pool()),
                ParameterValue::literal("1000"),
            ],
        ),
    ])
}

fn run(bp: &Blueprint) -> ResolutionOutcome {
    resolve(
        &bp.validators,
        &chain_inputs(),
        &Sha256Parameterizer,
        &ResolutionPolicy::default(),
    )
    .expect("preflight passes")
}

fn request() -> SubmissionRequest {
    SubmissionRequest {
        source_url: "https://github.com/acme/treasury".into(),
        commit: "35f1a0d51c8663782ab052f869d5c82b756e8615".into(),
        source_path: Some("onchain".into()),
        compiler: Some("aiken".into()),
        compiler_version: "v1.1.3".into(),
    }
}

#[test]
fn blueprint_merges_purposes_by_hash() {
    let bp = blueprint();
    assert_eq!(bp.validators.len(), 3);
    assert!(bp.skipped.is_empty());
    let pool = bp.validator(&pool()).expect("pool loaded");
    assert_eq!(
        pool.purposes.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["else", "spend"]
    );
    assert_eq!(pool.unparameterized_hash.to_hex(), POOL_HASH);
}

#[test]
fn chain_converges_in_two_passes() {
    let outcome = run(&blueprint());
    assert_eq!(outcome.termination, TerminationReason::Converged);
    assert_eq!(outcome.passes_used, 2);
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
}

#[test]
fn chain_hashes_match_hand_computed_values() {
    let bp = blueprint();
    let outcome = run(&bp);
    let settings_hash = ScriptHash::parse(SETTINGS_HASH).unwrap();

    let pool_v = bp.validator(&pool()).unwrap();
    let pool_params = vec![settings_hash.to_parameter_cbor()];
    let pool_final =
        Sha256Parameterizer::hash(&pool_v.compiled_code, &pool_params, pool_v.plutus_version);

    let treasury_v = bp.validator(&treasury()).unwrap();
    let treasury_params = vec![pool_final.to_parameter_cbor(), "1903e8".to_string()];
    let treasury_final = Sha256Parameterizer::hash(
        &treasury_v.compiled_code,
        &treasury_params,
        treasury_v.plutus_version,
    );

    assert_eq!(outcome.hash_of(&settings()), Some(&settings_hash));
    assert_eq!(outcome.hash_of(&pool()), Some(&pool_final));
    assert_eq!(outcome.hash_of(&treasury()), Some(&treasury_final));
    assert_eq!(outcome.resolved_params[&pool()], pool_params);
    assert_eq!(outcome.resolved_params[&treasury()], treasury_params);
}

#[test]
fn submission_keys_by_unparameterized_hash() {
    let bp = blueprint();
    let outcome = run(&bp);
    let sub = build_submission(&request(), &bp.validators, &outcome).unwrap();

    assert_eq!(sub.included, vec![pool(), treasury()]);
    assert!(sub.omitted.is_empty());
    let keys: Vec<&str> = sub
        .metadata
        .parameters
        .iter()
        .map(|e| e.script_hash.as_str())
        .collect();
    assert_eq!(keys, vec![POOL_HASH, TREASURY_HASH]);
    assert!(sub.cbor_hex.starts_with("d8799f"));
    assert_eq!(sub.chunks.concat(), sub.cbor_hex);
    // Treasury's key sorts first on the wire.
    let pos_treasury = sub.cbor_hex.find(TREASURY_HASH).unwrap();
    let pos_pool = sub.cbor_hex.find(POOL_HASH).unwrap();
    assert!(pos_treasury < pos_pool);
}

#[test]
fn compare_against_expected_final_hashes() {
    let bp = blueprint();
    let outcome = run(&bp);
    let mut expected: Vec<String> = bp
        .validators
        .iter()
        .map(|v| outcome.hash_of(&v.id).unwrap().to_hex().to_uppercase())
        .collect();
    assert!(compare_hashes(&expected, &outcome, &bp.validators).all_match());

    expected.pop();
    expected.push(TREASURY_HASH.to_string());
    let report = compare_hashes(&expected, &outcome, &bp.validators);
    assert!(!report.all_match());
    assert_eq!(report.matched.len(), 2);
    assert_eq!(report.unmatched_expected, vec![TREASURY_HASH.to_string()]);
}

#[test]
fn repeated_runs_are_identical() {
    let bp = blueprint();
    let a = run(&bp);
    let b = run(&bp);
    assert_eq!(a, b);
    let sub_a = build_submission(&request(), &bp.validators, &a).unwrap();
    let sub_b = build_submission(&request(), &bp.validators, &b).unwrap();
    assert_eq!(sub_a.cbor_hex, sub_b.cbor_hex);
    assert_eq!(sub_a.digest, sub_b.digest);
}

#[test]
fn mutual_reference_exhausts_budget_and_keeps_partial_state() {
    let bp = blueprint();
    let inputs = ValidatorInputs::from([
        (pool(), vec![ParameterValue::reference(treasury())]),
        (
            treasury(),
            vec![
                ParameterValue::reference(pool()),
                ParameterValue::literal("1000"),
            ],
        ),
    ]);
    let outcome = resolve(
        &bp.validators,
        &inputs,
        &Sha256Parameterizer,
        &ResolutionPolicy::default(),
    )
    .unwrap();
    assert_eq!(
        outcome.termination,
        TerminationReason::PassBudgetExhausted { max_passes: 10 }
    );
    assert_eq!(outcome.passes_used, 10);
    assert!(!outcome.converged());
    assert!(outcome.is_fully_resolved(&pool()));
    assert!(outcome.is_fully_resolved(&treasury()));
}

#[test]
fn missing_literal_omits_validator_from_submission() {
    let bp = blueprint();
    let inputs = ValidatorInputs::from([
        (pool(), vec![ParameterValue::reference(settings())]),
        (treasury(), vec![ParameterValue::reference(pool())]),
    ]);
    let outcome = resolve(
        &bp.validators,
        &inputs,
        &Sha256Parameterizer,
        &ResolutionPolicy::default(),
    )
    .unwrap();
    assert!(outcome.converged());
    assert_eq!(outcome.hash_of(&treasury()).unwrap().to_hex(), TREASURY_HASH);

    let sub = build_submission(&request(), &bp.validators, &outcome).unwrap();
    assert_eq!(sub.included, vec![pool()]);
    assert_eq!(sub.omitted, vec![treasury()]);
}
