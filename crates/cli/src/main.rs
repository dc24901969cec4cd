// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use blueprint_cli::commands::{inspect, replay, run, timeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Blueprint CLI - run, replay and inspect deterministic blueprint runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the kernel on fixture files and write ledger.json and artifacts.json
    Run {
        /// Seed text file
        #[arg(long)]
        seed: PathBuf,

        /// Pinned target (JSON)
        #[arg(long)]
        pin: PathBuf,

        /// Policy (JSON)
        #[arg(long)]
        policy: PathBuf,

        /// Recorded proposer output (JSON object keyed interpretations:{seed_hash}:{n})
        #[arg(long)]
        recordings: PathBuf,

        #[arg(long)]
        run_id: String,

        /// Base of the ordering tokens written into records
        #[arg(long, default_value = "t0")]
        ts_base: String,

        /// Output directory
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Replay a ledger and check it reproduces its summary
    Replay {
        ledger_path: PathBuf,

        #[arg(long)]
        run_id: String,
    },
    /// List the evidence records of a ledger
    Timeline {
        ledger_path: PathBuf,
    },
    /// Report on the files of a run directory
    Inspect {
        #[arg(long, short)]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "blueprint_cli=info,blueprint_kernel=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            pin,
            policy,
            recordings,
            run_id,
            ts_base,
            out,
        } => run::run(run::RunArgs {
            seed: &seed,
            pin: &pin,
            policy: &policy,
            recordings: &recordings,
            run_id: &run_id,
            ts_base: &ts_base,
            out: &out,
        }),
        Commands::Replay { ledger_path, run_id } => {
            let report = replay::run(&ledger_path, &run_id)?;
            if !report.matches_expected {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Timeline { ledger_path } => timeline::run(&ledger_path),
        Commands::Inspect { dir } => inspect::run(&dir),
    }
}
