//! # lattice-cli: Lattice Data Model Command-Line Interface
//!
//! Checks model payloads offline, before they are sent to the server.
//!
//! ## Subcommands
//!
//! - `validate`: build a payload file as a given model and report the first
//!   validation error.
//! - `canonicalize`: print the canonical key of a valid payload and its
//!   SHA-256 digest.
//! - `fqn`: parse a `namespace.name` string.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here return an exit code.
//! - Model semantics come from `lattice-models`; nothing is re-validated here.

pub mod canonicalize;
pub mod fqn;
pub mod input;
pub mod kind;
pub mod validate;
