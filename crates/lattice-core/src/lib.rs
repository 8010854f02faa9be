//! # lattice-core: Data Model Construction & Validation Framework
//!
//! The leaf crate of the Lattice SDK. It defines the pieces every concrete
//! model in `lattice-models` is assembled from:
//!
//! 1. **[`Fqn`]**: the `namespace.name` identifier, parsed from an instance,
//!    an object, a single string, or two strings, with a 63-character limit.
//! 2. **Field validators** ([`validators`]): pure predicates for non-empty
//!    string, UUID format, enum membership, non-empty array of valid X.
//! 3. **Field parsers** ([`fields`]): predicates paired with the
//!    `InvalidParameter` error a setter raises.
//! 4. **Build/validate contract** ([`Model`], [`ModelBuilder`],
//!    [`is_valid_model`]): draft → value, and the non-failing validity query.
//! 5. **Canonical projection** ([`CanonicalKey`], [`ContentDigest`]):
//!    deterministic bytes for hashing, separate from the wire object.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lattice-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Logging goes through `tracing`; no subscriber is installed here.

pub mod canonical;
pub mod collections;
pub mod digest;
pub mod enumeration;
pub mod error;
pub mod fields;
pub mod fqn;
pub mod model;
pub mod object;
pub mod validators;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalKey;
pub use collections::{AclKey, UniqueSet};
pub use digest::{ContentDigest, MalformedDigest};
pub use enumeration::{StringEnum, UnknownMember};
pub use error::{CanonicalizationError, FqnError, ValidationError};
pub use fqn::{Fqn, FqnSource, MAX_FQN_LENGTH};
pub use model::{Model, ModelBuilder};
pub use object::ObjectReader;
pub use validators::{is_valid_model, UuidInput};

pub use uuid::Uuid;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
