//! # Entity Types
//!
//! An entity type is the schema of a kind of entity: its name, the ordered
//! property types that make up its primary key, the ordered property types
//! it carries, and per-property tags.
//!
//! ## Invariants
//!
//! - `key` and `properties` are order-significant; duplicates are kept as
//!   given.
//! - `schemas` and each `propertyTags` entry are sets.
//! - `propertyTags` keys are property type ids; the wire form is an object
//!   keyed by the hyphenated UUID string.

use std::collections::BTreeMap;

use lattice_core::{fields, Fqn, FqnSource, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::SecurableType;

/// Tags attached to each property type of an entity type.
pub type PropertyTags = BTreeMap<Uuid, UniqueSet<String>>;

/// The schema of a kind of entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(rename = "type")]
    type_fqn: Fqn,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    key: Vec<Uuid>,
    properties: Vec<Uuid>,
    schemas: UniqueSet<Fqn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_type: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<SecurableType>,
    property_tags: PropertyTags,
}

impl EntityType {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The entity type's name.
    pub fn type_fqn(&self) -> &Fqn {
        &self.type_fqn
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Primary-key property type ids, in key order.
    pub fn key(&self) -> &[Uuid] {
        &self.key
    }

    /// Property type ids, in declaration order.
    pub fn properties(&self) -> &[Uuid] {
        &self.properties
    }

    /// Schemas this entity type belongs to.
    pub fn schemas(&self) -> &UniqueSet<Fqn> {
        &self.schemas
    }

    /// The entity type this one extends.
    pub fn base_type(&self) -> Option<Uuid> {
        self.base_type
    }

    /// Securable category.
    pub fn category(&self) -> Option<SecurableType> {
        self.category
    }

    /// Tags per property type id.
    pub fn property_tags(&self) -> &PropertyTags {
        &self.property_tags
    }
}

/// Builder for [`EntityType`].
#[derive(Debug, Clone, Default)]
pub struct EntityTypeBuilder {
    id: Option<Uuid>,
    type_fqn: Option<Fqn>,
    title: Option<String>,
    description: Option<String>,
    key: Option<Vec<Uuid>>,
    properties: Option<Vec<Uuid>>,
    schemas: Option<UniqueSet<Fqn>>,
    base_type: Option<Uuid>,
    category: Option<SecurableType>,
    property_tags: Option<PropertyTags>,
}

impl EntityTypeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id. The empty string leaves it unset.
    pub fn set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("id", id)? {
            self.id = Some(id);
        }
        Ok(self)
    }

    /// Set the name, in any FQN source shape.
    pub fn set_type(mut self, fqn: impl Into<FqnSource>) -> Result<Self, ValidationError> {
        self.type_fqn = Some(fields::fqn("type", fqn)?);
        Ok(self)
    }

    /// Set the title.
    pub fn set_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        self.title = Some(fields::non_empty_string("title", title)?);
        Ok(self)
    }

    /// Set the description. The empty string leaves it unset.
    pub fn set_description(mut self, description: impl Into<String>) -> Result<Self, ValidationError> {
        if let Some(description) = fields::optional_string("description", description)? {
            self.description = Some(description);
        }
        Ok(self)
    }

    /// Set the primary-key property type ids, in key order.
    pub fn set_key<I>(mut self, key: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.key = Some(fields::uuid_seq("key", key)?);
        Ok(self)
    }

    /// Set the property type ids, in declaration order.
    pub fn set_properties<I>(mut self, properties: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.properties = Some(fields::uuid_seq("properties", properties)?);
        Ok(self)
    }

    /// Set the schemas this entity type belongs to.
    pub fn set_schemas<I>(mut self, schemas: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<FqnSource>,
    {
        self.schemas = Some(fields::fqn_set("schemas", schemas)?);
        Ok(self)
    }

    /// Set the base entity type. The empty string leaves it unset.
    pub fn set_base_type(mut self, base_type: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(base_type) = fields::optional_uuid("baseType", base_type)? {
            self.base_type = Some(base_type);
        }
        Ok(self)
    }

    /// Set the securable category. The empty string leaves it unset.
    pub fn set_category(mut self, category: impl AsRef<str>) -> Result<Self, ValidationError> {
        if let Some(category) = fields::optional_member("category", category)? {
            self.category = Some(category);
        }
        Ok(self)
    }

    /// Set the tags of each property type.
    pub fn set_property_tags<I, K, T>(mut self, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: UuidInput,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let mut parsed = PropertyTags::new();
        for (id, values) in fields::uuid_keyed("propertyTags", tags)? {
            parsed.insert(id, fields::string_set("propertyTags", values)?);
        }
        self.property_tags = Some(parsed);
        Ok(self)
    }
}

/// Read an object of string arrays keyed by id.
pub(crate) fn read_string_multimap<'a>(
    field: &'static str,
    map: &'a Map<String, Value>,
) -> Result<Vec<(&'a str, Vec<&'a str>)>, ValidationError> {
    map.iter()
        .map(|(k, v)| {
            let values = v
                .as_array()
                .and_then(|items| items.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
                .ok_or_else(|| ValidationError::invalid(field, "an object of string arrays"))?;
            Ok((k.as_str(), values))
        })
        .collect()
}

impl From<&EntityType> for EntityTypeBuilder {
    fn from(entity_type: &EntityType) -> Self {
        Self {
            id: entity_type.id,
            type_fqn: Some(entity_type.type_fqn.clone()),
            title: Some(entity_type.title.clone()),
            description: entity_type.description.clone(),
            key: Some(entity_type.key.clone()),
            properties: Some(entity_type.properties.clone()),
            schemas: Some(entity_type.schemas.clone()),
            base_type: entity_type.base_type,
            category: entity_type.category,
            property_tags: Some(entity_type.property_tags.clone()),
        }
    }
}

impl ModelBuilder for EntityTypeBuilder {
    type Model = EntityType;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(EntityType::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(fqn) = obj.get("type") {
            builder = builder.set_type(fqn)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(key) = obj.str_array("key")? {
            builder = builder.set_key(key)?;
        }
        if let Some(properties) = obj.str_array("properties")? {
            builder = builder.set_properties(properties)?;
        }
        if let Some(schemas) = obj.array("schemas")? {
            builder = builder.set_schemas(schemas)?;
        }
        if let Some(base_type) = obj.str("baseType")? {
            builder = builder.set_base_type(base_type)?;
        }
        if let Some(category) = obj.str("category")? {
            builder = builder.set_category(category)?;
        }
        if let Some(tags) = obj.map("propertyTags")? {
            builder = builder.set_property_tags(read_string_multimap("propertyTags", tags)?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<EntityType, ValidationError> {
        Ok(EntityType {
            id: self.id,
            type_fqn: self.type_fqn.clone().ok_or(ValidationError::missing("type"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            key: self.key.clone().unwrap_or_default(),
            properties: self.properties.clone().unwrap_or_default(),
            schemas: self.schemas.clone().unwrap_or_default(),
            base_type: self.base_type,
            category: self.category,
            property_tags: self.property_tags.clone().unwrap_or_default(),
        })
    }
}

model_contract!(EntityType, EntityTypeBuilder, is_valid_entity_type);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const P1: &str = "00000000-0000-0000-0000-000000000001";
    const P2: &str = "00000000-0000-0000-0000-000000000002";

    fn minimal() -> EntityType {
        EntityTypeBuilder::new()
            .set_type(json!({"namespace": "LATTICE", "name": "MyEntity"}))
            .unwrap()
            .set_title("title")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn minimal_wire_object_has_defaults_and_no_optionals() {
        assert_eq!(
            minimal().to_wire_object().unwrap(),
            json!({
                "type": {"namespace": "LATTICE", "name": "MyEntity"},
                "title": "title",
                "key": [],
                "properties": [],
                "schemas": [],
                "propertyTags": {}
            })
        );
    }

    #[test]
    fn key_preserves_order_and_duplicates() {
        let et = minimal().to_builder().set_key([P2, P1, P2]).unwrap().build().unwrap();
        assert_eq!(et.key().len(), 3);
        let reordered = minimal().to_builder().set_key([P1, P2, P2]).unwrap().build().unwrap();
        assert_ne!(et, reordered);
    }

    #[test]
    fn schemas_are_a_set() {
        let a = minimal().to_builder().set_schemas(["a.x", "b.y", "a.x"]).unwrap().build().unwrap();
        let b = minimal().to_builder().set_schemas(["b.y", "a.x"]).unwrap().build().unwrap();
        assert_eq!(a.schemas().len(), 2);
        assert_eq!(a, b);
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }

    #[test]
    fn property_tags() {
        let et = minimal()
            .to_builder()
            .set_property_tags([(P1, vec!["pk", "pk", "name"])])
            .unwrap()
            .build()
            .unwrap();
        let id = Uuid::parse_str(P1).unwrap();
        assert_eq!(et.property_tags()[&id].len(), 2);
        assert!(minimal().to_builder().set_property_tags([("nope", vec!["x"])]).is_err());
    }

    #[test]
    fn optional_fields() {
        let et = minimal()
            .to_builder()
            .set_category(SecurableType::EntityType)
            .unwrap()
            .set_base_type("")
            .unwrap()
            .set_description("")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(et.category(), Some(SecurableType::EntityType));
        assert_eq!(et.base_type(), None);
        assert!(minimal().to_builder().set_category("Table").is_err());
        assert!(minimal().to_builder().set_base_type("nope").is_err());
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            EntityTypeBuilder::new().set_title("t").unwrap().build().unwrap_err(),
            ValidationError::missing("type")
        );
        assert_eq!(
            EntityTypeBuilder::new().set_type("a.b").unwrap().build().unwrap_err(),
            ValidationError::missing("title")
        );
    }

    #[test]
    fn full_object_round_trip() {
        let value = json!({
            "id": P2,
            "type": {"namespace": "general", "name": "person"},
            "title": "Person",
            "description": "a person",
            "key": [P1],
            "properties": [P1, P2],
            "schemas": [{"namespace": "general", "name": "people"}],
            "baseType": P1,
            "category": "EntityType",
            "propertyTags": {P1: ["pk"]}
        });
        let et = EntityType::try_from_value(&value).unwrap();
        assert_eq!(et.to_wire_object().unwrap(), value);
        assert!(is_valid_entity_type(&value));
        assert!(is_valid_entity_type(&et));
        let parsed: EntityType = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, et);
    }

    #[test]
    fn schemas_accept_string_form() {
        let value = json!({"type": "a.b", "title": "t", "schemas": ["general.people"]});
        let et = EntityType::try_from_value(&value).unwrap();
        assert_eq!(et.schemas().len(), 1);
    }
}
