//! # Canonicalize Subcommand
//!
//! Prints the canonical key (RFC 8785 JSON) of a valid payload followed by
//! its digest. Two payloads describing the same model print the same lines,
//! whatever their key order or set element order.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::{load_payload, InputFormat};
use crate::kind::{BuildOutcome, ModelKind};

/// Arguments for the `lattice canonicalize` subcommand.
#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// Model to build the payload as.
    #[arg(long, short, value_enum)]
    pub model: ModelKind,

    /// Payload format; defaults to the file extension.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Print only the digest.
    #[arg(long)]
    pub digest_only: bool,

    /// Payload file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the canonicalize subcommand.
///
/// Returns exit code: 0 if the payload is valid, 1 if it is not.
pub fn run_canonicalize(args: &CanonicalizeArgs) -> Result<u8> {
    let payload = load_payload(&args.path, args.format)?;
    match args.model.canonicalize(&payload)? {
        BuildOutcome::Valid(canonical) => {
            if !args.digest_only {
                println!("{}", canonical.key);
            }
            println!("{}", canonical.digest);
            Ok(0)
        }
        BuildOutcome::Invalid(e) => {
            println!("INVALID {}: {}: {e}", args.model.model_name(), args.path.display());
            Ok(1)
        }
    }
}
