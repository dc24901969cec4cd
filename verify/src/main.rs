// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{Context, Result};
use blueprint_kernel::config::KERNEL_VERSION;
use blueprint_kernel::{EvidenceRecord, ReplayProof, Replayer};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Standalone ledger verifier. Prints a replay proof as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ledger file (JSON array of evidence records)
    ledger: PathBuf,

    /// Run the ledger belongs to
    #[arg(long)]
    run_id: String,
}

fn load_ledger(path: &PathBuf) -> Result<Vec<EvidenceRecord>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read ledger {}", path.display()))?;
    serde_json::from_slice(&bytes).context("Failed to parse ledger JSON")
}

fn main() -> Result<()> {
    let args = Args::parse();

    eprintln!("Blueprint Verifier v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Kernel contract: {}", KERNEL_VERSION);

    let records = load_ledger(&args.ledger)?;

    let report = Replayer::default()
        .replay(&records, &args.run_id)
        .context("Replay failed")?;

    let proof = ReplayProof::from_report(&report, KERNEL_VERSION);
    println!("{}", serde_json::to_string_pretty(&proof)?);

    if !proof.matches_expected {
        std::process::exit(1);
    }
    Ok(())
}
