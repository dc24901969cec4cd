// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use blueprint_kernel::validate_chain;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::fixtures;

const HASH_PREFIX: usize = 12;

fn short(hash: &str) -> &str {
    hash.get(..HASH_PREFIX).unwrap_or(hash)
}

pub fn run(ledger_path: &Path) -> anyhow::Result<()> {
    let records = fixtures::load_ledger(ledger_path)?;

    if !validate_chain(&records) {
        println!("\n⚠️  WARNING: Hash chain does not validate. Showing records as stored.\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Timestamp", "Kind", "Parent", "Record"]);

    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            record.ts.clone(),
            record.kind.as_str().to_string(),
            record.parent.as_deref().map_or("-", short).to_string(),
            short(&record.record_hash).to_string(),
        ]);
    }

    println!("\nEvidence Timeline\n");
    println!("{table}\n");

    Ok(())
}
