//! # Canonical Key: JCS Byte Projection
//!
//! `CanonicalKey` is the deterministic byte form of a model, used for
//! hashing, content addressing, and order-independent comparison outside of
//! Rust's `Eq`/`Hash` (caches keyed by bytes, digests sent to other
//! processes).
//!
//! ## Invariants
//!
//! - The only constructor is [`CanonicalKey::new`].
//! - Object keys are sorted and separators are compact (RFC 8785 via
//!   `serde_jcs`), so optional-field insertion order never matters.
//! - Unordered collections (`UniqueSet`) already serialize sorted, so their
//!   insertion order never matters either.
//! - Optional fields that are unset are absent, never `null`.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization of a value's serde projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::SerializationFailed`] if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Ok(Self(serde_jcs::to_string(&value)?))
    }

    /// The canonical JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
