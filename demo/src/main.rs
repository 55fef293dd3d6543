//! CURA Clinical Text Runtime — Demo CLI
//!
//! Runs one or both of the two clinical demo scenarios.  Each scenario uses
//! real CURA components (rule tables, pipeline machine, insight engine,
//! feedback log) wired together with sample clinical text.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- adaptor
//!   cargo run -p demo -- station

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// CURA — clinical text processing runtime demo.
///
/// Each subcommand runs one or both of the two clinical scenarios,
/// demonstrating staged sanitation, rule-based decision support, and
/// feedback recording.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "CURA clinical text runtime demo",
    long_about = "Runs CURA demo scenarios showing the staged sanitation pipeline,\n\
                  the insight rule engine, feedback recording, and autocomplete."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run both scenarios in sequence.
    RunAll,
    /// Scenario 1: Data Adaptor (staged sanitation with compliance metadata).
    Adaptor,
    /// Scenario 2: Doctor Station (insight suggestions, feedback, autocomplete).
    Station,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Adaptor => scenarios::adaptor::run_scenario(),
        Command::Station => scenarios::station::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> cura_contracts::error::CuraResult<()> {
    scenarios::adaptor::run_scenario()?;
    scenarios::station::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("CURA — Clinical Text Processing Runtime");
    println!("Demo Scenarios");
    println!("=======================================");
    println!();
    println!("Sanitation pipeline per document:");
    println!("  [1] CLEANING    — strip markup, collapse entities, drop noise tokens");
    println!("  [2] MAPPING     — normalize colloquial terminology");
    println!("  [3] MASKING     — redact PII (IDs, names, addresses)");
    println!("  [4] VECTORIZING — handoff marker for the embedding collaborator");
    println!("  then a compliance scan gates forwarding of the output");
    println!();
}
