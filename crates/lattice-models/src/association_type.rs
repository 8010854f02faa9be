//! # Association Types
//!
//! An association type is an entity type whose entities connect entities
//! of the `src` entity types to entities of the `dst` entity types.

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entity_type::EntityType;

/// An edge entity type with its allowed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationType {
    entity_type: EntityType,
    src: UniqueSet<Uuid>,
    dst: UniqueSet<Uuid>,
    bidirectional: bool,
}

impl AssociationType {
    /// The edge entity type.
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// Allowed source entity type ids.
    pub fn src(&self) -> &UniqueSet<Uuid> {
        &self.src
    }

    /// Allowed destination entity type ids.
    pub fn dst(&self) -> &UniqueSet<Uuid> {
        &self.dst
    }

    /// Whether the edge may be traversed in both directions.
    pub fn bidirectional(&self) -> bool {
        self.bidirectional
    }
}

/// Builder for [`AssociationType`].
#[derive(Debug, Clone, Default)]
pub struct AssociationTypeBuilder {
    entity_type: Option<EntityType>,
    src: Option<UniqueSet<Uuid>>,
    dst: Option<UniqueSet<Uuid>>,
    bidirectional: Option<bool>,
}

impl AssociationTypeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge entity type.
    pub fn set_entity_type(mut self, entity_type: EntityType) -> Result<Self, ValidationError> {
        self.entity_type = Some(entity_type);
        Ok(self)
    }

    /// Set the allowed source entity type ids.
    pub fn set_src<I>(mut self, src: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.src = Some(fields::uuid_set("src", src)?);
        Ok(self)
    }

    /// Set the allowed destination entity type ids.
    pub fn set_dst<I>(mut self, dst: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.dst = Some(fields::uuid_set("dst", dst)?);
        Ok(self)
    }

    /// Set whether the edge is bidirectional.
    pub fn set_bidirectional(mut self, bidirectional: bool) -> Result<Self, ValidationError> {
        self.bidirectional = Some(bidirectional);
        Ok(self)
    }
}

impl From<&AssociationType> for AssociationTypeBuilder {
    fn from(at: &AssociationType) -> Self {
        Self {
            entity_type: Some(at.entity_type.clone()),
            src: Some(at.src.clone()),
            dst: Some(at.dst.clone()),
            bidirectional: Some(at.bidirectional),
        }
    }
}

impl ModelBuilder for AssociationTypeBuilder {
    type Model = AssociationType;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(AssociationType::NAME, value)?;
        let mut builder = Self::new();
        if let Some(entity_type) = obj.object("entityType")? {
            builder = builder.set_entity_type(nested!(EntityType, "entityType", entity_type)?)?;
        }
        if let Some(src) = obj.str_array("src")? {
            builder = builder.set_src(src)?;
        }
        if let Some(dst) = obj.str_array("dst")? {
            builder = builder.set_dst(dst)?;
        }
        if let Some(bidirectional) = obj.bool("bidirectional")? {
            builder = builder.set_bidirectional(bidirectional)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<AssociationType, ValidationError> {
        Ok(AssociationType {
            entity_type: self
                .entity_type
                .clone()
                .ok_or(ValidationError::missing("entityType"))?,
            src: self.src.clone().unwrap_or_default(),
            dst: self.dst.clone().unwrap_or_default(),
            bidirectional: self.bidirectional.unwrap_or(false),
        })
    }
}

model_contract!(AssociationType, AssociationTypeBuilder, is_valid_association_type);
