//! # Error Types: Construction and Validation Failures
//!
//! Defines the error types used throughout the Lattice data model. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - There is exactly one construction/validation error kind,
//!   [`ValidationError`]. Builder setters and `build()` return it
//!   synchronously; the first failing setter aborts the chain.
//! - Validity queries (`is_valid_*`) never surface errors; they log the
//!   error and return `false`.
//! - FQN parsing has its own [`FqnError`] so `Fqn::of` can say precisely
//!   which shape was wrong. Builders fold it into
//!   [`ValidationError::InvalidParameter`] naming their own field.

use thiserror::Error;

/// A builder setter rejected its argument, or `build()` found a required
/// property missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A supplied value failed the type, shape, or enum check for its field.
    #[error("invalid parameter: {field} must be {expected}")]
    InvalidParameter {
        /// Wire name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted shape.
        expected: &'static str,
    },

    /// `build()` was called without a required property.
    #[error("missing property: {0} is a required property")]
    MissingProperty(&'static str),

    /// A builder was seeded from a value that is not a JSON object.
    #[error("invalid {model} candidate: expected an object, found {found}")]
    NotAnObject {
        /// Model the candidate was meant to become.
        model: &'static str,
        /// JSON kind that was found instead.
        found: &'static str,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidParameter`].
    pub fn invalid(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidParameter { field, expected }
    }

    /// Shorthand for [`ValidationError::MissingProperty`].
    pub fn missing(field: &'static str) -> Self {
        Self::MissingProperty(field)
    }

    /// The wire name of the field this error is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } | Self::MissingProperty(field) => Some(field),
            Self::NotAnObject { .. } => None,
        }
    }
}

/// A fully qualified name could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FqnError {
    /// Construction from a dynamic argument list received neither one nor two arguments.
    #[error("invalid argument count: expected 1 or 2 arguments, got {0}")]
    Arity(usize),

    /// A single-string source had no separator, or a leading/trailing one.
    #[error("malformed FQN string: \"{0}\" (expected namespace.name)")]
    MalformedString(String),

    /// An object source lacked string `namespace`/`name` keys.
    #[error("malformed FQN object: expected string \"namespace\" and \"name\" keys")]
    MalformedObject,

    /// Namespace or name is empty after trimming.
    #[error("namespace and name must both be non-empty")]
    EmptyPart,

    /// The name part contains a dot, so its string form would split differently.
    #[error("FQN name \"{0}\" must not contain '.'")]
    DottedName(String),

    /// The canonical `namespace.name` string exceeds the length limit.
    #[error("FQN \"{fqn}\" is {length} characters long (limit {limit})")]
    TooLong {
        /// The offending canonical string.
        fqn: String,
        /// Its length in characters.
        length: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// Errors while projecting a model to its wire object or canonical key.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display_names_field_and_shape() {
        let err = ValidationError::invalid("aclKey", "a non-empty array of UUIDs");
        assert_eq!(
            err.to_string(),
            "invalid parameter: aclKey must be a non-empty array of UUIDs"
        );
        assert_eq!(err.field(), Some("aclKey"));
    }

    #[test]
    fn missing_property_display() {
        let err = ValidationError::missing("title");
        assert_eq!(err.to_string(), "missing property: title is a required property");
    }

    #[test]
    fn not_an_object_has_no_field() {
        let err = ValidationError::NotAnObject { model: "Ace", found: "array" };
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("Ace"));
    }

    #[test]
    fn fqn_too_long_display() {
        let err = FqnError::TooLong { fqn: "a.b".into(), length: 64, limit: 63 };
        assert!(err.to_string().contains("64"));
    }
}
