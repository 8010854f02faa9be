//! # Object Reader
//!
//! Typed, field-by-field access to a candidate JSON object, used by every
//! builder's `from_value`. Absent keys and explicit `null` both read as
//! `None` (the field is skipped); a present value of the wrong JSON kind is
//! an [`InvalidParameter`](ValidationError::InvalidParameter) for that key.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Borrowed view over the keys of a candidate object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
}

/// JSON kind name for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'a> ObjectReader<'a> {
    /// Open `value` as an object.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NotAnObject`] if `value` is not a JSON object.
    pub fn new(model: &'static str, value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(ValidationError::NotAnObject {
                model,
                found: kind_of(other),
            }),
        }
    }

    /// The raw value under `key`, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// A string field.
    pub fn str(&self, key: &'static str) -> Result<Option<&'a str>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ValidationError::invalid(key, "a string")),
        }
    }

    /// A boolean field.
    pub fn bool(&self, key: &'static str) -> Result<Option<bool>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(ValidationError::invalid(key, "a boolean")),
        }
    }

    /// A non-negative integer field.
    pub fn u64(&self, key: &'static str) -> Result<Option<u64>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| ValidationError::invalid(key, "a non-negative integer")),
        }
    }

    /// An array field.
    pub fn array(&self, key: &'static str) -> Result<Option<&'a [Value]>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(_) => Err(ValidationError::invalid(key, "an array")),
        }
    }

    /// An array field whose elements must all be strings.
    pub fn str_array(&self, key: &'static str) -> Result<Option<Vec<&'a str>>, ValidationError> {
        match self.array(key)? {
            None => Ok(None),
            Some(items) => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .map(Some)
                .ok_or_else(|| ValidationError::invalid(key, "an array of strings")),
        }
    }

    /// An object field, returned as the raw value for nested builders.
    pub fn object(&self, key: &'static str) -> Result<Option<&'a Value>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(value @ Value::Object(_)) => Ok(Some(value)),
            Some(_) => Err(ValidationError::invalid(key, "an object")),
        }
    }

    /// An object field, returned as its map.
    pub fn map(&self, key: &'static str) -> Result<Option<&'a Map<String, Value>>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ValidationError::invalid(key, "an object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_objects() {
        for value in [json!(null), json!([]), json!("x"), json!(1), json!(true)] {
            let err = ObjectReader::new("Thing", &value).unwrap_err();
            assert!(matches!(err, ValidationError::NotAnObject { model: "Thing", .. }));
        }
    }

    #[test]
    fn null_reads_as_absent() {
        let value = json!({"title": null});
        let reader = ObjectReader::new("Thing", &value).unwrap();
        assert_eq!(reader.str("title").unwrap(), None);
        assert_eq!(reader.str("missing").unwrap(), None);
    }

    #[test]
    fn wrong_kind_names_the_field() {
        let value = json!({"title": 7, "tags": [1], "flag": "yes"});
        let reader = ObjectReader::new("Thing", &value).unwrap();
        assert_eq!(reader.str("title").unwrap_err().field(), Some("title"));
        assert_eq!(reader.str_array("tags").unwrap_err().field(), Some("tags"));
        assert_eq!(reader.bool("flag").unwrap_err().field(), Some("flag"));
        assert!(reader.object("title").is_err());
    }

    #[test]
    fn typed_reads() {
        let value = json!({"s": "a", "b": true, "n": 3, "arr": ["x", "y"], "o": {"k": 1}});
        let reader = ObjectReader::new("Thing", &value).unwrap();
        assert_eq!(reader.str("s").unwrap(), Some("a"));
        assert_eq!(reader.bool("b").unwrap(), Some(true));
        assert_eq!(reader.u64("n").unwrap(), Some(3));
        assert_eq!(reader.str_array("arr").unwrap(), Some(vec!["x", "y"]));
        assert!(reader.map("o").unwrap().is_some());
    }
}
