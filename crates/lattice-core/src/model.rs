//! # Build/Validate Contract
//!
//! Every concrete model is an immutable value object paired with a mutable
//! builder. The pair implements [`Model`] and [`ModelBuilder`]:
//!
//! ```text
//!   Builder::new() ──set_x(..)?──▶ Builder ──build()?──▶ Model
//!        ▲                                                  │
//!        └──────────── Builder::from(&model) ───────────────┘
//!   Builder::from_value(&json) ── calls set_x for every present field
//! ```
//!
//! - Setters check shape only and fail immediately; the first bad setter
//!   aborts the chain.
//! - `build()` checks required fields, fills defaults for defaultable
//!   collections, and copies the draft into a fresh model. It may be called
//!   repeatedly.
//! - [`is_valid_model`](crate::validators::is_valid_model) wraps the whole
//!   sequence and reports a boolean.
//!
//! Two projections are kept separate: [`Model::to_wire_object`] (the JSON
//! body exchanged with the server) and [`Model::canonical_key`] (RFC 8785
//! bytes for hashing and content addressing).

use serde::Serialize;
use serde_json::Value;

use crate::canonical::CanonicalKey;
use crate::digest::ContentDigest;
use crate::error::{CanonicalizationError, ValidationError};

/// A mutable draft that validates fields as they are set and materializes a [`Model`].
pub trait ModelBuilder: Default + Clone + Sized {
    /// The value object this builder produces.
    type Model: Model<Builder = Self>;

    /// Seed a builder from a canonical plain object, calling the setter of
    /// every present, non-null field.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NotAnObject`] if `value` is not an object, or the
    /// first setter error.
    fn from_value(value: &Value) -> Result<Self, ValidationError>;

    /// Check required fields and produce the model.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingProperty`] naming a missing required field.
    fn build(&self) -> Result<Self::Model, ValidationError>;
}

/// An immutable value object with structural equality.
pub trait Model: Serialize + Clone + Eq + std::hash::Hash + Sized {
    /// The builder for this model.
    type Builder: ModelBuilder<Model = Self>;

    /// Model name used in logs and errors.
    const NAME: &'static str;

    /// A builder seeded with this instance's fields.
    fn to_builder(&self) -> Self::Builder;

    /// Build a model from its canonical plain object.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`] raised while seeding or building.
    fn try_from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::Builder::from_value(value)?.build()
    }

    /// The JSON object sent to and received from the server.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    fn to_wire_object(&self) -> Result<Value, CanonicalizationError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Deterministic canonical bytes of this model's projection.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    fn canonical_key(&self) -> Result<CanonicalKey, CanonicalizationError> {
        CanonicalKey::new(self)
    }

    /// SHA-256 digest of [`Model::canonical_key`].
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        Ok(ContentDigest::of(&self.canonical_key()?))
    }
}

/// Implement `Deserialize` for a model by routing the parsed JSON value
/// through its builder, so invalid payloads are rejected at
/// deserialization time rather than silently accepted.
#[macro_export]
macro_rules! impl_validating_deserialize {
    ($ty:ty) => {
        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <$ty as $crate::Model>::try_from_value(&raw)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
