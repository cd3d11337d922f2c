//! # skyscope CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skyscope_cli::credential::{run_issue, run_keygen, run_verify, IssueArgs, KeygenArgs, VerifyArgs};
use skyscope_cli::stats::{run_stats, StatsArgs};

/// Skyscope operator CLI.
///
/// Signing keys and tier credentials for the API server, and offline
/// statistics over an OpenFlights data directory.
#[derive(Parser, Debug)]
#[command(name = "skyscope", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an Ed25519 signing seed.
    Keygen(KeygenArgs),

    /// Issue a tier credential signed with SKYSCOPE_SIGNING_KEY_HEX.
    Issue(IssueArgs),

    /// Verify a credential; exits non-zero when it is rejected.
    Verify(VerifyArgs),

    /// Print tier-scoped statistics for one dataset.
    Stats(StatsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Keygen(args) => run_keygen(args),
        Commands::Issue(args) => run_issue(args),
        Commands::Verify(args) => run_verify(args),
        Commands::Stats(args) => run_stats(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
