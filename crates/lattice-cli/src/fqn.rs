//! # FQN Subcommand
//!
//! Parses a fully qualified name the way every builder does and prints its
//! parts, or why it was rejected.

use anyhow::Result;
use clap::Args;
use lattice_core::{Fqn, MAX_FQN_LENGTH};

/// Arguments for the `lattice fqn` subcommand.
#[derive(Args, Debug)]
pub struct FqnArgs {
    /// A `namespace.name` string, or a namespace when NAME is given.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Name part, to build from two strings.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Execute the fqn subcommand.
///
/// Returns exit code: 0 if the value is a valid FQN, 1 if not.
pub fn run_fqn(args: &FqnArgs) -> Result<u8> {
    let parsed = match &args.name {
        Some(name) => Fqn::new(args.value.as_str(), name.as_str()),
        None => Fqn::of(args.value.as_str()),
    };
    match parsed {
        Ok(fqn) => {
            println!("namespace: {}", fqn.namespace());
            println!("name: {}", fqn.name());
            println!("fqn: {fqn} ({}/{MAX_FQN_LENGTH} chars)", fqn.to_string().chars().count());
            Ok(0)
        }
        Err(e) => {
            println!("INVALID: {e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str, name: Option<&str>) -> u8 {
        run_fqn(&FqnArgs {
            value: value.to_string(),
            name: name.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn exit_codes() {
        assert_eq!(run("general.person", None), 0);
        assert_eq!(run("a.b.c", None), 0);
        assert_eq!(run("general", Some("person")), 0);
        assert_eq!(run("person", None), 1);
        assert_eq!(run("general.", None), 1);
        assert_eq!(run(&format!("ns.{}", "x".repeat(61)), None), 1);
    }
}
