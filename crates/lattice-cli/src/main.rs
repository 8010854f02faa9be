//! # lattice CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lattice_cli::canonicalize::{run_canonicalize, CanonicalizeArgs};
use lattice_cli::fqn::{run_fqn, FqnArgs};
use lattice_cli::validate::{run_validate, ValidateArgs};

/// Lattice data model toolchain.
///
/// Validates and canonicalizes entity data model and authorization payloads
/// offline, using the same builders the SDK uses before sending them.
#[derive(Parser, Debug)]
#[command(name = "lattice", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a payload file as a model and report whether it is valid.
    Validate(ValidateArgs),

    /// Print the canonical key and digest of a valid payload file.
    Canonicalize(CanonicalizeArgs),

    /// Parse a fully qualified name.
    Fqn(FqnArgs),
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

    tracing::debug!("lattice CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Canonicalize(args) => run_canonicalize(&args),
        Commands::Fqn(args) => run_fqn(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
