//! # Schemas
//!
//! A schema is a named bundle of entity types and property types.

use lattice_core::{fields, Fqn, FqnSource, Model, ModelBuilder, ObjectReader, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::entity_type::EntityType;
use crate::property_type::PropertyType;

/// A named bundle of entity types and property types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    fqn: Fqn,
    entity_types: Vec<EntityType>,
    property_types: Vec<PropertyType>,
}

impl Schema {
    /// The schema's name.
    pub fn fqn(&self) -> &Fqn {
        &self.fqn
    }

    /// Member entity types.
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    /// Member property types.
    pub fn property_types(&self) -> &[PropertyType] {
        &self.property_types
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fqn: Option<Fqn>,
    entity_types: Option<Vec<EntityType>>,
    property_types: Option<Vec<PropertyType>>,
}

impl SchemaBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name, in any FQN source shape.
    pub fn set_fqn(mut self, fqn: impl Into<FqnSource>) -> Result<Self, ValidationError> {
        self.fqn = Some(fields::fqn("fqn", fqn)?);
        Ok(self)
    }

    /// Set the member entity types. Repeats are dropped.
    pub fn set_entity_types(
        mut self,
        entity_types: impl IntoIterator<Item = EntityType>,
    ) -> Result<Self, ValidationError> {
        self.entity_types = Some(fields::dedup_list(entity_types));
        Ok(self)
    }

    /// Set the member property types. Repeats are dropped.
    pub fn set_property_types(
        mut self,
        property_types: impl IntoIterator<Item = PropertyType>,
    ) -> Result<Self, ValidationError> {
        self.property_types = Some(fields::dedup_list(property_types));
        Ok(self)
    }
}

impl From<&Schema> for SchemaBuilder {
    fn from(schema: &Schema) -> Self {
        Self {
            fqn: Some(schema.fqn.clone()),
            entity_types: Some(schema.entity_types.clone()),
            property_types: Some(schema.property_types.clone()),
        }
    }
}

impl ModelBuilder for SchemaBuilder {
    type Model = Schema;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Schema::NAME, value)?;
        let mut builder = Self::new();
        if let Some(fqn) = obj.get("fqn") {
            builder = builder.set_fqn(fqn)?;
        }
        if let Some(items) = obj.array("entityTypes")? {
            builder = builder.set_entity_types(fields::each(items, |v| nested!(EntityType, "entityTypes", v))?)?;
        }
        if let Some(items) = obj.array("propertyTypes")? {
            builder =
                builder.set_property_types(fields::each(items, |v| nested!(PropertyType, "propertyTypes", v))?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Schema, ValidationError> {
        Ok(Schema {
            fqn: self.fqn.clone().ok_or(ValidationError::missing("fqn"))?,
            entity_types: self.entity_types.clone().unwrap_or_default(),
            property_types: self.property_types.clone().unwrap_or_default(),
        })
    }
}

model_contract!(Schema, SchemaBuilder, is_valid_schema);
