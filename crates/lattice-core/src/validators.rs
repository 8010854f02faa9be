//! # Field Validators
//!
//! Stateless predicates reused by every builder to decide whether a field
//! value is acceptable. They never log and never fail; builders turn a
//! `false` into a [`ValidationError`](crate::ValidationError) naming the field.
//!
//! The generic model check, [`is_valid_model`], also lives here: it is the
//! one place where any candidate shape is funneled through a builder.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::enumeration::StringEnum;
use crate::model::{Model, ModelBuilder};

/// Anything a UUID-valued setter accepts: a parsed [`Uuid`] or its string form.
pub trait UuidInput {
    /// The parsed UUID, or `None` if the input is not a well-formed UUID.
    fn to_uuid(&self) -> Option<Uuid>;

    /// Whether the input is absent-like (the empty string).
    fn is_blank(&self) -> bool {
        false
    }
}

impl UuidInput for Uuid {
    fn to_uuid(&self) -> Option<Uuid> {
        Some(*self)
    }
}

impl UuidInput for str {
    fn to_uuid(&self) -> Option<Uuid> {
        if is_valid_uuid(self) {
            Uuid::try_parse(self).ok()
        } else {
            None
        }
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl UuidInput for String {
    fn to_uuid(&self) -> Option<Uuid> {
        self.as_str().to_uuid()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: UuidInput + ?Sized> UuidInput for &T {
    fn to_uuid(&self) -> Option<Uuid> {
        (**self).to_uuid()
    }

    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

/// Whether a JSON value is present (anything but `null`).
pub fn is_defined(value: &Value) -> bool {
    !value.is_null()
}

/// Whether `value` has at least one non-whitespace character.
pub fn is_non_empty_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Whether a JSON value is a non-empty array.
pub fn is_non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}

/// Whether a JSON value is an object with at least one key.
pub fn is_non_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| !map.is_empty())
}

/// Whether `value` is a UUID in the hyphenated 8-4-4-4-12 form.
///
/// Only the format is checked; whether the UUID refers to anything is a
/// server-side concern. `uuid` also parses the simple, braced, and URN
/// forms, which the length check excludes.
pub fn is_valid_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Whether `value` is the wire string of a member of `E`.
pub fn is_valid_enum_member<E: StringEnum>(value: &str) -> bool {
    E::from_member(value).is_some()
}

/// True iff `values` is non-empty and every element satisfies `is_valid`.
pub fn validate_non_empty_array<T>(values: &[T], is_valid: impl Fn(&T) -> bool) -> bool {
    !values.is_empty() && values.iter().all(is_valid)
}

/// Whether `candidate` builds into a `B::Model`.
///
/// The candidate may be a model instance, its canonical plain object, or any
/// keyed collection serializing to the same object (`BTreeMap`, `HashMap`,
/// `serde_json::Map`). It is projected to JSON, fed through
/// [`ModelBuilder::from_value`], and built. Never fails: every rejection,
/// including `null`, arrays, and primitives, is logged at error level and
/// reported as `false`.
pub fn is_valid_model<B, C>(candidate: &C) -> bool
where
    B: ModelBuilder,
    C: Serialize + ?Sized,
{
    let model = <B::Model as Model>::NAME;
    let value = match serde_json::to_value(candidate) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(model, error = %e, "candidate could not be projected to JSON");
            return false;
        }
    };
    match B::from_value(&value).and_then(|builder| builder.build()) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(model, error = %e, candidate = %value, "invalid {model}");
            false
        }
    }
}
