//! # Field Parsers
//!
//! Setter building blocks: each function combines a predicate from
//! [`validators`](crate::validators) with the error a setter must raise,
//! so concrete builders read as one line per field.
//!
//! The `optional_*` variants treat the empty string as "not supplied" and
//! return `Ok(None)`; the setter then leaves its field untouched.

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::collections::UniqueSet;
use crate::enumeration::StringEnum;
use crate::error::ValidationError;
use crate::fqn::{Fqn, FqnSource};
use crate::validators::{is_non_empty_string, UuidInput};

/// A required UUID.
pub fn uuid(field: &'static str, input: impl UuidInput) -> Result<Uuid, ValidationError> {
    input
        .to_uuid()
        .ok_or_else(|| ValidationError::invalid(field, "a valid UUID"))
}

/// An optional UUID; the empty string means "not supplied".
pub fn optional_uuid(
    field: &'static str,
    input: impl UuidInput,
) -> Result<Option<Uuid>, ValidationError> {
    if input.is_blank() {
        return Ok(None);
    }
    uuid(field, input).map(Some)
}

/// A deduplicated set of UUIDs (may be empty).
pub fn uuid_set<I>(field: &'static str, ids: I) -> Result<UniqueSet<Uuid>, ValidationError>
where
    I: IntoIterator,
    I::Item: UuidInput,
{
    ids.into_iter()
        .map(|id| id.to_uuid())
        .collect::<Option<UniqueSet<_>>>()
        .ok_or_else(|| ValidationError::invalid(field, "an array of valid UUIDs"))
}

/// A deduplicated, non-empty set of UUIDs.
pub fn non_empty_uuid_set<I>(field: &'static str, ids: I) -> Result<UniqueSet<Uuid>, ValidationError>
where
    I: IntoIterator,
    I::Item: UuidInput,
{
    let set = uuid_set(field, ids)
        .map_err(|_| ValidationError::invalid(field, "a non-empty array of valid UUIDs"))?;
    if set.is_empty() {
        return Err(ValidationError::invalid(field, "a non-empty array of valid UUIDs"));
    }
    Ok(set)
}

/// An order-significant sequence of UUIDs, duplicates kept (may be empty).
pub fn uuid_seq<I>(field: &'static str, ids: I) -> Result<Vec<Uuid>, ValidationError>
where
    I: IntoIterator,
    I::Item: UuidInput,
{
    ids.into_iter()
        .map(|id| id.to_uuid())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ValidationError::invalid(field, "an array of valid UUIDs"))
}

/// A required non-blank string.
pub fn non_empty_string(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    if is_non_empty_string(&value) {
        Ok(value)
    } else {
        Err(ValidationError::invalid(field, "a non-empty string"))
    }
}

/// An optional string; the empty string means "not supplied", whitespace is rejected.
pub fn optional_string(
    field: &'static str,
    value: impl Into<String>,
) -> Result<Option<String>, ValidationError> {
    let value = value.into();
    if value.is_empty() {
        return Ok(None);
    }
    non_empty_string(field, value).map(Some)
}

/// A deduplicated set of non-blank strings (may be empty).
pub fn string_set<I>(field: &'static str, values: I) -> Result<UniqueSet<String>, ValidationError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    values
        .into_iter()
        .map(|v| {
            let v = v.into();
            is_non_empty_string(&v).then_some(v)
        })
        .collect::<Option<UniqueSet<_>>>()
        .ok_or_else(|| ValidationError::invalid(field, "an array of non-empty strings"))
}

/// A required FQN in any accepted source shape.
pub fn fqn(field: &'static str, source: impl Into<FqnSource>) -> Result<Fqn, ValidationError> {
    Fqn::of(source).map_err(|_| ValidationError::invalid(field, "a valid FQN"))
}

/// A deduplicated set of FQNs (may be empty).
pub fn fqn_set<I>(field: &'static str, sources: I) -> Result<UniqueSet<Fqn>, ValidationError>
where
    I: IntoIterator,
    I::Item: Into<FqnSource>,
{
    sources
        .into_iter()
        .map(|s| Fqn::of(s).ok())
        .collect::<Option<UniqueSet<_>>>()
        .ok_or_else(|| ValidationError::invalid(field, "an array of valid FQNs"))
}

/// A required enum member, given as a typed member or its wire string.
pub fn member<E: StringEnum>(field: &'static str, value: impl AsRef<str>) -> Result<E, ValidationError> {
    E::from_member(value.as_ref())
        .ok_or_else(|| ValidationError::invalid(field, "a valid enum member"))
}

/// An optional enum member; the empty string means "not supplied".
pub fn optional_member<E: StringEnum>(
    field: &'static str,
    value: impl AsRef<str>,
) -> Result<Option<E>, ValidationError> {
    if value.as_ref().is_empty() {
        return Ok(None);
    }
    member(field, value).map(Some)
}

/// A deduplicated set of enum members (may be empty).
pub fn member_set<E, I>(field: &'static str, values: I) -> Result<UniqueSet<E>, ValidationError>
where
    E: StringEnum + Ord,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| E::from_member(v.as_ref()))
        .collect::<Option<UniqueSet<_>>>()
        .ok_or_else(|| ValidationError::invalid(field, "an array of valid enum members"))
}

/// A deduplicated, non-empty set of enum members.
pub fn non_empty_member_set<E, I>(
    field: &'static str,
    values: I,
) -> Result<UniqueSet<E>, ValidationError>
where
    E: StringEnum + Ord,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let set = member_set(field, values)
        .map_err(|_| ValidationError::invalid(field, "a non-empty array of valid enum members"))?;
    if set.is_empty() {
        return Err(ValidationError::invalid(
            field,
            "a non-empty array of valid enum members",
        ));
    }
    Ok(set)
}

/// Ordered, deduplicated models: first occurrence wins, order otherwise kept.
pub fn dedup_list<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Collect `(key, value)` pairs keyed by UUID, parsing each key.
///
/// Two keys naming the same UUID (e.g. differing only in letter case) are
/// rejected rather than merged.
pub fn uuid_keyed<K, V, I>(field: &'static str, entries: I) -> Result<BTreeMap<Uuid, V>, ValidationError>
where
    K: UuidInput,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = BTreeMap::new();
    for (key, value) in entries {
        let id = key
            .to_uuid()
            .ok_or_else(|| ValidationError::invalid(field, "an object keyed by valid UUIDs"))?;
        if map.insert(id, value).is_some() {
            return Err(ValidationError::invalid(field, "an object with distinct UUID keys"));
        }
    }
    Ok(map)
}

/// Each element of a JSON array parsed by `parse`, failing on the first error.
pub fn each<T>(
    items: &[Value],
    parse: impl Fn(&Value) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    items.iter().map(parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";

    crate::string_enum! {
        enum Level {
            Low => "LOW",
            High => "HIGH",
        }
    }

    #[test]
    fn optional_uuid_blank_is_none() {
        assert_eq!(optional_uuid("id", "").unwrap(), None);
        assert!(optional_uuid("id", ID).unwrap().is_some());
        assert!(optional_uuid("id", "bad").is_err());
    }

    #[test]
    fn uuid_set_dedups_in_first_occurrence_order() {
        let a = "00000000-0000-0000-0000-00000000000a";
        let b = "00000000-0000-0000-0000-00000000000b";
        let set = uuid_set("ids", [b, a, b]).unwrap();
        let as_strings: Vec<String> = set.iter().map(Uuid::to_string).collect();
        assert_eq!(as_strings, vec![b.to_string(), a.to_string()]);
    }

    #[test]
    fn non_empty_sets_reject_empty() {
        let none: [&str; 0] = [];
        assert!(non_empty_uuid_set("ids", none).is_err());
        assert!(non_empty_member_set::<Level, _>("levels", none).is_err());
        assert!(non_empty_member_set::<Level, _>("levels", ["LOW"]).is_ok());
    }

    #[test]
    fn uuid_seq_keeps_duplicates() {
        let seq = uuid_seq("key", [ID, ID]).unwrap();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn strings() {
        assert!(non_empty_string("title", "  ").is_err());
        assert_eq!(optional_string("description", "").unwrap(), None);
        assert!(optional_string("description", "  ").is_err());
        assert!(string_set("tags", ["a", ""]).is_err());
        assert_eq!(string_set("tags", ["a", "a"]).unwrap().len(), 1);
    }

    #[test]
    fn members() {
        assert_eq!(member::<Level>("level", Level::High).unwrap(), Level::High);
        assert_eq!(member::<Level>("level", "LOW").unwrap(), Level::Low);
        assert!(member::<Level>("level", "MEDIUM").is_err());
        assert_eq!(optional_member::<Level>("level", "").unwrap(), None);
    }

    #[test]
    fn fqn_errors_name_the_field() {
        let err = fqn("type", "nodot").unwrap_err();
        assert_eq!(err.field(), Some("type"));
        assert!(fqn_set("schemas", ["a.b", "c"]).is_err());
    }

    #[test]
    fn dedup_list_preserves_order() {
        assert_eq!(dedup_list([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn uuid_keyed_rejects_bad_keys() {
        assert!(uuid_keyed("tags", [("bad", 1)]).is_err());
        assert_eq!(uuid_keyed("tags", [(ID, 1)]).unwrap().len(), 1);
    }

    #[test]
    fn uuid_keyed_rejects_keys_differing_only_in_case() {
        let upper = ID.to_uppercase();
        let err = uuid_keyed("tags", [(ID.to_string(), 1), (upper, 2)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid("tags", "an object with distinct UUID keys")
        );
    }
}
