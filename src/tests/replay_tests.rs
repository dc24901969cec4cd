// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::fixtures::{interp, policy, recorded, request, todo_interpretations, RUN_ID, SEED};
use crate::artifacts::VerificationPack;
use crate::canonical::CanonicalValue;
use crate::config::KernelConfig;
use crate::error::{ErrorClass, KernelError};
use crate::ledger::{validate_chain, EvidenceRecord, Ledger, RecordPayload};
use crate::policy::Policy;
use crate::proposer::NullProposer;
use crate::replay::{replay_from_ledger, ReplayMismatch, Replayer};
use crate::state::{run_engine, RunOutcome, RunResult};

fn converged() -> RunResult {
    let proposer = recorded(SEED, 3, todo_interpretations());
    run_engine(&request(policy()), &proposer).unwrap()
}

/// Re-appends (possibly edited) payloads into a fresh, internally valid chain.
fn rechain(records: &[EvidenceRecord]) -> Vec<EvidenceRecord> {
    let mut ledger = Ledger::new();
    for r in records {
        ledger.append(r.ts.clone(), r.kind, r.payload.clone()).unwrap();
    }
    ledger.into_records()
}

#[test]
fn test_replay_reproduces_summary() {
    let result = converged();
    let report = replay_from_ledger(&result.ledger_records, RUN_ID).unwrap();

    assert!(report.matches_expected, "{:?}", report.mismatches);
    assert!(report.mismatches.is_empty());
    assert_eq!(report.summary_hash.as_deref(), result.outcome.expected_summary_hash());
    assert_eq!(report.nodes, result.nodes);
    assert_eq!(report.edges, result.edges);
    assert_eq!(report.outcome.as_ref(), Some(&result.outcome));
    assert_eq!(report.record_count, 5);
    assert_eq!(report.recorded_kernel_version.as_deref(), Some(KernelConfig::default().kernel_version.as_str()));

    let RunOutcome::Blueprint { verification, .. } = &result.outcome else {
        panic!("expected blueprint");
    };
    assert_eq!(report.dag_root_hash, verification.dag_root_hash);
}

#[test]
fn test_replay_after_json_persistence() {
    let result = converged();
    let json = serde_json::to_string_pretty(&result.ledger_records).unwrap();
    let reloaded: Vec<EvidenceRecord> = serde_json::from_str(&json).unwrap();
    let report = replay_from_ledger(&reloaded, RUN_ID).unwrap();
    assert!(report.matches_expected);
}

#[test]
fn test_replay_of_refusal() {
    let result = run_engine(&request(policy()), &NullProposer).unwrap();
    let report = replay_from_ledger(&result.ledger_records, RUN_ID).unwrap();
    assert!(report.matches_expected, "{:?}", report.mismatches);
    assert_eq!(report.summary_hash, None);
    assert!(report.nodes.is_empty());
    assert!(matches!(report.outcome, Some(RunOutcome::Refused(_))));
}

#[test]
fn test_tampered_chain_is_an_error() {
    let mut records = converged().ledger_records;
    records[1].ts = "forged".to_string();
    let err = replay_from_ledger(&records, RUN_ID).unwrap_err();
    assert!(matches!(err, KernelError::ChainInvalid { index: 1, .. }));
    assert_eq!(err.class(), ErrorClass::Invariant);
}

#[test]
fn test_rechained_forged_winner_is_reported() {
    let mut records = converged().ledger_records;
    if let RecordPayload::InterpretationCommit(p) = &mut records[2].payload {
        p.interpretation = interp("Full", &["multi_user", "sync"], "todo list with sync");
    }
    let forged = rechain(&records);

    let report = replay_from_ledger(&forged, RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report
        .mismatches
        .iter()
        .any(|m| matches!(m, ReplayMismatch::Winner { computed, .. } if computed == "Minimal")));
}

#[test]
fn test_rechained_forged_summary_is_reported() {
    let mut records = converged().ledger_records;
    if let RecordPayload::Blueprint(p) = &mut records[4].payload {
        p.verification.expected_summary_hash = "0".repeat(64);
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report
        .mismatches
        .iter()
        .any(|m| matches!(m, ReplayMismatch::Hash { field: "summary_hash", .. })));
}

#[test]
fn test_rechained_forged_refusal_evidence_is_reported() {
    let mut records = run_engine(&request(policy()), &NullProposer).unwrap().ledger_records;
    if let RecordPayload::Refusal(p) = &mut records[2].payload {
        p.refusal.evidence_record_hashes.pop();
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report.mismatches.contains(&ReplayMismatch::RefusalEvidence));
}

#[test]
fn test_truncated_ledger_has_no_artifact() {
    let records = converged().ledger_records;
    let report = replay_from_ledger(&records[..4], RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report.mismatches.contains(&ReplayMismatch::MissingArtifact));
    assert_eq!(report.nodes.len(), 3);
}

#[test]
fn test_wrong_run_id_is_reported() {
    let records = converged().ledger_records;
    let report = replay_from_ledger(&records, "run-other").unwrap();
    assert!(!report.matches_expected);
    assert!(report
        .mismatches
        .iter()
        .any(|m| matches!(m, ReplayMismatch::RunId { .. })));
}

#[test]
fn test_kernel_version_mismatch_is_reported() {
    let records = converged().ledger_records;
    let replayer = Replayer::new(KernelConfig {
        kernel_version: "9.9.9".to_string(),
    });
    let report = replayer.replay(&records, RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(matches!(
        report.mismatches.first(),
        Some(ReplayMismatch::KernelVersion { running, .. }) if running == "9.9.9"
    ));
}

#[test]
fn test_empty_ledger_replays_to_nothing() {
    let report = replay_from_ledger(&[], RUN_ID).unwrap();
    assert_eq!(report.ledger_last_hash, None);
    assert!(report.outcome.is_none());
    assert!(!report.matches_expected);
}

#[test]
fn test_float_pin_survives_json_persistence() {
    let mut req = request(policy());
    req.pin = CanonicalValue::object([
        ("budget", CanonicalValue::float(1.0715660391465826e-75).unwrap()),
        ("ratio", CanonicalValue::float(0.1).unwrap()),
    ]);
    let proposer = recorded(SEED, 3, todo_interpretations());
    let result = run_engine(&req, &proposer).unwrap();

    let json = serde_json::to_string(&result.ledger_records).unwrap();
    let reloaded: Vec<EvidenceRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, result.ledger_records);
    assert!(validate_chain(&reloaded));

    let report = replay_from_ledger(&reloaded, RUN_ID).unwrap();
    assert!(report.matches_expected, "{:?}", report.mismatches);
}

/// Two candidates sharing one assumption: one contradiction.
fn contested() -> RunResult {
    let candidates = vec![
        interp("A", &["shared", "x"], "a"),
        interp("B", &["shared"], "b"),
    ];
    run_engine(&request(policy()), &recorded(SEED, 3, candidates)).unwrap()
}

#[test]
fn test_commit_under_refusing_policy_is_reported() {
    let mut records = contested().ledger_records;
    if let RecordPayload::Seedpack(p) = &mut records[0].payload {
        p.policy_summary = Policy::new(3, 50, 5, 0, 20);
    }

    // Rechain and reseal the verification pack so only the policy differs.
    let mut ledger = Ledger::new();
    for r in &records[..4] {
        ledger.append(r.ts.clone(), r.kind, r.payload.clone()).unwrap();
    }
    let mut artifact = records[4].payload.clone();
    if let RecordPayload::Blueprint(p) = &mut artifact {
        p.verification = VerificationPack::new(
            ledger.get_last_hash().unwrap(),
            p.verification.dag_root_hash.clone(),
            p.verification.artifact_hashes.clone(),
        )
        .unwrap();
    }
    ledger.append(records[4].ts.clone(), records[4].kind, artifact).unwrap();

    let report = replay_from_ledger(ledger.records(), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert_eq!(
        report.mismatches,
        vec![ReplayMismatch::UnrefusedCommit {
            reasons: vec!["contradictions_exceeded:1>0".to_string()],
        }]
    );
}

#[test]
fn test_rechained_forged_refusal_reasons_are_reported() {
    let mut records = run_engine(&request(policy()), &NullProposer).unwrap().ledger_records;
    if let RecordPayload::Refusal(p) = &mut records[2].payload {
        p.refusal.reason_codes = vec!["max_steps_exceeded:2>1".to_string()];
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report.mismatches.contains(&ReplayMismatch::RefusalReasons {
        recorded: vec!["max_steps_exceeded:2>1".to_string()],
        computed: vec!["empty_proposal".to_string()],
    }));
    // Suggestions still follow the computed reasons.
    assert!(!report.mismatches.contains(&ReplayMismatch::RefusalSuggestions));
}

#[test]
fn test_rechained_forged_refusal_suggestions_are_reported() {
    let mut records = run_engine(&request(policy()), &NullProposer).unwrap().ledger_records;
    if let RecordPayload::Refusal(p) = &mut records[2].payload {
        p.refusal.policy_suggestions = vec!["Try again later".to_string()];
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert_eq!(report.mismatches, vec![ReplayMismatch::RefusalSuggestions]);
}

#[test]
fn test_unjustified_refusal_is_reported() {
    let tight = Policy::new(3, 50, 5, 10, 1);
    let proposer = recorded(SEED, 3, todo_interpretations());
    let mut records = run_engine(&request(tight), &proposer).unwrap().ledger_records;
    if let RecordPayload::Seedpack(p) = &mut records[0].payload {
        p.policy_summary = policy();
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report.mismatches.contains(&ReplayMismatch::RefusalReasons {
        recorded: vec!["max_steps_exceeded:2>1".to_string()],
        computed: vec![],
    }));
}

#[test]
fn test_duplicate_recorded_node_ids_are_reported() {
    let mut records = converged().ledger_records;
    if let RecordPayload::DagCommit(p) = &mut records[3].payload {
        let mut forged = p.nodes[2].clone();
        forged.payload = CanonicalValue::object([("assumption", CanonicalValue::from("other"))]);
        forged.payload_hash = "0".repeat(64);
        p.nodes.push(forged);
    }
    let report = replay_from_ledger(&rechain(&records), RUN_ID).unwrap();
    assert!(!report.matches_expected);
    assert!(report
        .mismatches
        .iter()
        .any(|m| matches!(m, ReplayMismatch::Structure { index: 3, .. })));
}
