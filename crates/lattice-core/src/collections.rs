//! # Collection Types
//!
//! Two collection shapes appear in model fields and they have opposite
//! equality rules:
//!
//! - [`UniqueSet`]: ids, permissions, tags, schemas. Duplicates are dropped
//!   on insertion (first occurrence wins) and equality/hashing ignore order.
//!   The wire form lists elements in sorted order so the projection does not
//!   depend on insertion order.
//! - [`AclKey`]: the path of a securable object in the access-control
//!   hierarchy. Order is significant, duplicates are kept as given, and the
//!   key must be non-empty.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validators::UuidInput;

/// A deduplicated collection with order-independent equality.
#[derive(Debug, Clone)]
pub struct UniqueSet<T>(Vec<T>);

impl<T> UniqueSet<T> {
    /// An empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Elements in first-occurrence order.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Iterate in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Ord> UniqueSet<T> {
    /// Insert `value` unless an equal element is present. Returns whether it was inserted.
    pub fn insert(&mut self, value: T) -> bool {
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    /// Whether an equal element is present.
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    /// Elements in sorted order.
    pub fn sorted(&self) -> Vec<&T> {
        let mut items: Vec<&T> = self.0.iter().collect();
        items.sort();
        items
    }
}

impl<T> Default for UniqueSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for UniqueSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: Ord> Extend<T> for UniqueSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> IntoIterator for UniqueSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a UniqueSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Ord> PartialEq for UniqueSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }
}

impl<T: Ord> Eq for UniqueSet<T> {}

impl<T: Ord + Hash> Hash for UniqueSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<T: Ord> PartialOrd for UniqueSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for UniqueSet<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl<T: Ord + Serialize> Serialize for UniqueSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.sorted())
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for UniqueSet<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}

/// An order-significant, non-empty sequence of UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AclKey(Vec<Uuid>);

impl AclKey {
    /// Parse an acl key from UUIDs or UUID strings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] for `field` if the
    /// sequence is empty or any element is not a valid UUID.
    pub fn parse<I>(field: &'static str, ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        let ids = ids
            .into_iter()
            .map(|id| id.to_uuid())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ValidationError::invalid(field, Self::EXPECTED))?;
        Self::new(ids).ok_or_else(|| ValidationError::invalid(field, Self::EXPECTED))
    }

    /// Wrap a non-empty sequence. Returns `None` if `ids` is empty.
    pub fn new(ids: Vec<Uuid>) -> Option<Self> {
        if ids.is_empty() {
            None
        } else {
            Some(Self(ids))
        }
    }

    const EXPECTED: &'static str = "a non-empty array of valid UUIDs";

    /// The UUIDs, root first.
    pub fn as_slice(&self) -> &[Uuid] {
        &self.0
    }

    /// Number of path segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: an acl key has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AclKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<Uuid>::deserialize(deserializer)?;
        Self::new(ids).ok_or_else(|| serde::de::Error::custom("acl key must be non-empty"))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any permutation of the same elements yields an equal set.
        #[test]
        fn permutation_invariant(mut items in prop::collection::vec(0u8..20, 0..16)) {
            let forward: UniqueSet<u8> = items.iter().copied().collect();
            items.reverse();
            let backward: UniqueSet<u8> = items.iter().copied().collect();
            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(
                serde_json::to_string(&forward).unwrap(),
                serde_json::to_string(&backward).unwrap()
            );
        }
    }
}
