//! # Fully Qualified Names
//!
//! [`Fqn`] is the canonical `namespace.name` identifier used as the key type
//! throughout the data model (`EntityType.type`, `PropertyType.type`,
//! `Schema.fqn`, ...).
//!
//! ## Construction
//!
//! Every accepted input shape is described by [`FqnSource`], and a single
//! parsing function turns any source into a validated `(namespace, name)`
//! pair:
//!
//! - an existing [`Fqn`];
//! - an object with string `namespace` and `name` keys;
//! - a single pre-formatted `"namespace.name"` string, split at the **last**
//!   dot so namespaces may themselves contain dots;
//! - two positional strings.
//!
//! [`Fqn::of`] returns the error; [`Fqn::is_valid`] and
//! [`Fqn::to_canonical_string`] fold it into `false` / `""` and never fail.
//!
//! ## Invariants
//!
//! - Namespace and name are non-empty after trimming, and the name has no
//!   dot, so the parts and the canonical string determine each other.
//! - `namespace.len() + 1 + name.len() <= MAX_FQN_LENGTH`, counted in characters.
//! - Equality, ordering, and hashing are defined on the canonical string.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FqnError;

/// Maximum length, in characters, of the canonical `namespace.name` string.
pub const MAX_FQN_LENGTH: usize = 63;

/// A validated `namespace.name` identifier. Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Fqn {
    namespace: String,
    name: String,
}

/// The input shapes an [`Fqn`] can be constructed from.
#[derive(Debug, Clone, PartialEq)]
pub enum FqnSource {
    /// An already-constructed name.
    Fqn(Fqn),
    /// A plain object with `namespace` and `name` keys.
    Object(Value),
    /// A single `"namespace.name"` string.
    Text(String),
    /// Namespace and name as two positional arguments.
    Parts(String, String),
}

impl FqnSource {
    /// Build a source from a dynamic argument list.
    ///
    /// One argument is treated as a string or an object depending on its
    /// JSON kind; two arguments must both be strings. Any other arity is an
    /// [`FqnError::Arity`] error.
    pub fn from_args(args: &[Value]) -> Result<Self, FqnError> {
        match args {
            [Value::String(text)] => Ok(Self::Text(text.clone())),
            [single] => Ok(Self::Object(single.clone())),
            [Value::String(namespace), Value::String(name)] => {
                Ok(Self::Parts(namespace.clone(), name.clone()))
            }
            [_, _] => Err(FqnError::MalformedObject),
            _ => Err(FqnError::Arity(args.len())),
        }
    }

    fn into_parts(self) -> Result<(String, String), FqnError> {
        match self {
            Self::Fqn(fqn) => Ok((fqn.namespace, fqn.name)),
            Self::Object(value) => parse_object(&value),
            Self::Text(text) => split_last_dot(&text),
            Self::Parts(namespace, name) => Ok((namespace, name)),
        }
    }
}

impl From<Fqn> for FqnSource {
    fn from(fqn: Fqn) -> Self {
        Self::Fqn(fqn)
    }
}

impl From<&Fqn> for FqnSource {
    fn from(fqn: &Fqn) -> Self {
        Self::Fqn(fqn.clone())
    }
}

impl From<&str> for FqnSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FqnSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for FqnSource {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl<N: Into<String>, M: Into<String>> From<(N, M)> for FqnSource {
    fn from((namespace, name): (N, M)) -> Self {
        Self::Parts(namespace.into(), name.into())
    }
}

impl From<Value> for FqnSource {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Object(other),
        }
    }
}

impl From<&Value> for FqnSource {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

fn parse_object(value: &Value) -> Result<(String, String), FqnError> {
    let map = value.as_object().ok_or(FqnError::MalformedObject)?;
    match (map.get("namespace"), map.get("name")) {
        (Some(Value::String(namespace)), Some(Value::String(name))) => {
            Ok((namespace.clone(), name.clone()))
        }
        _ => Err(FqnError::MalformedObject),
    }
}

fn split_last_dot(text: &str) -> Result<(String, String), FqnError> {
    match text.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < text.len() => {
            Ok((text[..idx].to_string(), text[idx + 1..].to_string()))
        }
        _ => Err(FqnError::MalformedString(text.to_string())),
    }
}

fn check_parts(namespace: &str, name: &str) -> Result<(), FqnError> {
    if namespace.trim().is_empty() || name.trim().is_empty() {
        return Err(FqnError::EmptyPart);
    }
    if name.contains('.') {
        return Err(FqnError::DottedName(name.to_string()));
    }
    let length = namespace.chars().count() + 1 + name.chars().count();
    if length > MAX_FQN_LENGTH {
        return Err(FqnError::TooLong {
            fqn: format!("{namespace}.{name}"),
            length,
            limit: MAX_FQN_LENGTH,
        });
    }
    Ok(())
}

impl Fqn {
    /// Construct a name from any accepted source shape.
    ///
    /// # Errors
    ///
    /// Returns [`FqnError`] if the source is malformed, either part is
    /// empty, or the canonical string exceeds [`MAX_FQN_LENGTH`].
    pub fn of(source: impl Into<FqnSource>) -> Result<Self, FqnError> {
        let (namespace, name) = source.into().into_parts()?;
        check_parts(&namespace, &name)?;
        Ok(Self { namespace, name })
    }

    /// Construct a name from namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, FqnError> {
        Self::of(FqnSource::Parts(namespace.into(), name.into()))
    }

    /// Construct a name from a dynamic argument list (see [`FqnSource::from_args`]).
    pub fn from_args(args: &[Value]) -> Result<Self, FqnError> {
        Self::of(FqnSource::from_args(args)?)
    }

    /// Whether `source` would construct a valid name. Never fails.
    pub fn is_valid(source: impl Into<FqnSource>) -> bool {
        match Self::of(source) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "invalid FQN");
                false
            }
        }
    }

    /// The canonical `namespace.name` string for `source`, or the empty
    /// string when the source is invalid.
    pub fn to_canonical_string(source: impl Into<FqnSource>) -> String {
        Self::of(source).map(|fqn| fqn.to_string()).unwrap_or_default()
    }

    /// The namespace part (may itself contain dots).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn canonical_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.namespace
            .chars()
            .chain(std::iter::once('.'))
            .chain(self.name.chars())
    }
}

impl PartialEq for Fqn {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_chars().eq(other.canonical_chars())
    }
}

impl Eq for Fqn {}

impl Hash for Fqn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.canonical_chars() {
            c.hash(state);
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Fqn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fqn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_chars().cmp(other.canonical_chars())
    }
}

impl std::fmt::Display for Fqn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl std::str::FromStr for Fqn {
    type Err = FqnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TryFrom<&str> for Fqn {
    type Error = FqnError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::of(s)
    }
}

impl<'de> Deserialize<'de> for Fqn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::of(raw).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rendering a name and parsing it back yields the same canonical string.
        #[test]
        fn canonical_string_round_trips(
            namespace in "[a-zA-Z][a-zA-Z0-9_.]{0,29}[a-zA-Z0-9]",
            name in "[a-zA-Z][a-zA-Z0-9_]{0,29}",
        ) {
            let fqn = Fqn::new(namespace, name).unwrap();
            let reparsed = Fqn::of(fqn.to_string()).unwrap();
            prop_assert_eq!(fqn.to_string(), reparsed.to_string());
        }

        /// Validity flips exactly at the length limit.
        #[test]
        fn length_limit_is_exact(ns_len in 1usize..70, name_len in 1usize..70) {
            let namespace = "n".repeat(ns_len);
            let name = "m".repeat(name_len);
            let expected = ns_len + 1 + name_len <= MAX_FQN_LENGTH;
            prop_assert_eq!(Fqn::is_valid((namespace.as_str(), name.as_str())), expected);
        }

        /// Validity queries never panic on arbitrary strings.
        #[test]
        fn is_valid_total_on_strings(text in ".{0,80}") {
            let _ = Fqn::is_valid(text.as_str());
            let _ = Fqn::to_canonical_string(text.as_str());
        }
    }
}
