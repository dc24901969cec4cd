// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::Path;

use anyhow::Context;
use blueprint_kernel::{Engine, KernelConfig, RunOutcome, RunRequest};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use crate::fixtures::{self, RunArtifacts, ARTIFACTS_FILE, LEDGER_FILE};

pub struct RunArgs<'a> {
    pub seed: &'a Path,
    pub pin: &'a Path,
    pub policy: &'a Path,
    pub recordings: &'a Path,
    pub run_id: &'a str,
    pub ts_base: &'a str,
    pub out: &'a Path,
}

pub fn run(args: RunArgs<'_>) -> anyhow::Result<()> {
    let request = RunRequest {
        run_id: args.run_id.to_string(),
        seed_text: fixtures::load_seed(args.seed)?,
        pin: fixtures::load_pin(args.pin)?,
        policy: fixtures::load_policy(args.policy)?,
        ts_base: args.ts_base.to_string(),
    };
    let proposer = fixtures::load_recordings(args.recordings)?;

    let config = KernelConfig::default();
    let engine = Engine::new(config.clone());
    let result = engine.run(&request, &proposer).context("Run failed")?;

    fs::create_dir_all(args.out)
        .with_context(|| format!("Failed to create output directory {}", args.out.display()))?;
    fixtures::write_json(&args.out.join(LEDGER_FILE), &result.ledger_records)?;
    fixtures::write_json(
        &args.out.join(ARTIFACTS_FILE),
        &RunArtifacts::from_result(&result, &config.kernel_version),
    )?;
    info!(run_id = %result.run_id, out = %args.out.display(), "run written");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Run", result.run_id.as_str()]);
    table.add_row(vec!["Outcome", result.outcome.label()]);
    table.add_row(vec!["Records", &result.ledger_records.len().to_string()]);
    table.add_row(vec!["Nodes", &result.nodes.len().to_string()]);
    match &result.outcome {
        RunOutcome::Blueprint { verification, .. } => {
            table.add_row(vec!["Summary", verification.expected_summary_hash.as_str()]);
        }
        RunOutcome::Refused(report) => {
            table.add_row(vec!["Reasons", &report.reason_codes.join(", ")]);
            table.add_row(vec!["Suggestions", &report.policy_suggestions.join("; ")]);
        }
    }

    println!("\nRun Result\n");
    println!("{table}\n");

    Ok(())
}
