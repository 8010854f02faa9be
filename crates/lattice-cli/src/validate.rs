//! # Validate Subcommand
//!
//! Builds a payload file as the requested model and reports the outcome.
//! Exactly the check `is_valid_<model>` performs, with the reason printed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::input::{load_payload, InputFormat};
use crate::kind::ModelKind;

/// Arguments for the `lattice validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Model to build the payload as.
    #[arg(long, short, value_enum)]
    pub model: ModelKind,

    /// Payload format; defaults to the file extension.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Payload file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the payload is valid, 1 if it is not.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let payload = load_payload(&args.path, args.format)?;
    Ok(report(args.model, &args.path, &payload))
}

fn report(kind: ModelKind, path: &Path, payload: &serde_json::Value) -> u8 {
    let name = kind.model_name();
    match kind.validate(payload) {
        Ok(()) => {
            println!("OK {name}: {}", path.display());
            0
        }
        Err(e) => {
            tracing::debug!(model = name, error = %e, "payload rejected");
            println!("INVALID {name}: {}: {e}", path.display());
            1
        }
    }
}
