// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;

use blueprint_kernel::ledger::verify_chain;

use crate::fixtures::{self, ARTIFACTS_FILE, LEDGER_FILE};

pub fn run(dir: &Path) -> anyhow::Result<()> {
    let ledger_path = dir.join(LEDGER_FILE);
    let artifacts_path = dir.join(ARTIFACTS_FILE);

    println!("\nRun Directory Report");
    println!("--------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Status", "Details"]);

    if ledger_path.exists() {
        match fixtures::load_ledger(&ledger_path) {
            Ok(records) => match verify_chain(&records) {
                Ok(()) => {
                    let head = records.last().map_or("empty", |r| r.record_hash.as_str());
                    let msg = format!("{} records, head {}", records.len(), head);
                    table.add_row(vec!["Ledger", "VALID", &msg]);
                }
                Err(violation) => {
                    table.add_row(vec!["Ledger", "BROKEN", &violation.to_string()]);
                }
            },
            Err(e) => {
                table.add_row(vec!["Ledger", "CORRUPT", &format!("{e:#}")]);
            }
        }
    } else {
        table.add_row(vec!["Ledger", "MISSING", ""]);
    }

    if artifacts_path.exists() {
        match fixtures::load_artifacts(&artifacts_path) {
            Ok(artifacts) => {
                let msg = format!(
                    "run {}, outcome {}, kernel {}",
                    artifacts.run_id,
                    artifacts.outcome.label(),
                    artifacts.kernel_version
                );
                table.add_row(vec!["Artifacts", "FOUND", &msg]);
            }
            Err(e) => {
                table.add_row(vec!["Artifacts", "CORRUPT", &format!("{e:#}")]);
            }
        }
    } else {
        table.add_row(vec!["Artifacts", "MISSING", ""]);
    }

    println!("{table}\n");

    Ok(())
}
