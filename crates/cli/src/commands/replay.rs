// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use anyhow::Context;
use blueprint_kernel::{ReplayReport, Replayer};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::fixtures;

/// Replays a ledger file and prints the report.
///
/// Returns the report so callers decide how to treat a mismatch; the binary
/// exits non-zero when `matches_expected` is false.
pub fn run(ledger_path: &Path, run_id: &str) -> anyhow::Result<ReplayReport> {
    let records = fixtures::load_ledger(ledger_path)?;
    let report = Replayer::default()
        .replay(&records, run_id)
        .with_context(|| format!("Replay of {} failed", ledger_path.display()))?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Run", report.run_id.as_str()]);
    table.add_row(vec!["Records", &report.record_count.to_string()]);
    table.add_row(vec![
        "Ledger head",
        report.ledger_last_hash.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec!["DAG root", report.dag_root_hash.as_str()]);
    table.add_row(vec![
        "Outcome",
        report.outcome.as_ref().map_or("none", |o| o.label()),
    ]);
    table.add_row(vec!["Summary", report.summary_hash.as_deref().unwrap_or("-")]);
    table.add_row(vec![
        "Matches",
        if report.matches_expected { "YES" } else { "NO" },
    ]);

    println!("\nReplay Report\n");
    println!("{table}\n");

    for mismatch in &report.mismatches {
        println!("  ✗ {mismatch}");
    }

    Ok(report)
}
