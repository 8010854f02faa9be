//! # Linking
//!
//! Linking merges entities from several entity sets that describe the same
//! real-world thing. A [`LinkingEntitySet`] names the output set and the
//! property correspondences to link on, a [`LinkingEntityType`] the merged
//! type, and a [`LinkingRequest`] asks the server to run the linking.
//!
//! ## Invariants
//!
//! - `linkingProperties` is an ordered sequence; each element maps an
//!   entity set id to the property type id compared in that set.
//! - `entityTypeIds` of a linking entity type is never empty.

use std::collections::BTreeMap;

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entity_set::EntitySet;
use crate::entity_type::EntityType;

/// One correspondence: entity set id to the property type id compared in it.
pub type LinkingProperties = BTreeMap<Uuid, Uuid>;

// ─── LinkingEntitySet ────────────────────────────────────────────────

/// The output entity set of a linking run and what to link on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingEntitySet {
    entity_set: EntitySet,
    linking_properties: Vec<LinkingProperties>,
}

impl LinkingEntitySet {
    /// The output entity set.
    pub fn entity_set(&self) -> &EntitySet {
        &self.entity_set
    }

    /// Property correspondences, in the order given.
    pub fn linking_properties(&self) -> &[LinkingProperties] {
        &self.linking_properties
    }
}

/// Builder for [`LinkingEntitySet`].
#[derive(Debug, Clone, Default)]
pub struct LinkingEntitySetBuilder {
    entity_set: Option<EntitySet>,
    linking_properties: Option<Vec<LinkingProperties>>,
}

impl LinkingEntitySetBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output entity set.
    pub fn set_entity_set(mut self, entity_set: EntitySet) -> Result<Self, ValidationError> {
        self.entity_set = Some(entity_set);
        Ok(self)
    }

    /// Set the property correspondences.
    pub fn set_linking_properties<I, M, K, V>(mut self, properties: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = M>,
        M: IntoIterator<Item = (K, V)>,
        K: UuidInput,
        V: UuidInput,
    {
        let mut parsed = Vec::new();
        for entry in properties {
            let keyed = fields::uuid_keyed("linkingProperties", entry)?;
            let mut map = LinkingProperties::new();
            for (entity_set_id, property_type_id) in keyed {
                map.insert(entity_set_id, fields::uuid("linkingProperties", property_type_id)?);
            }
            parsed.push(map);
        }
        self.linking_properties = Some(parsed);
        Ok(self)
    }
}

impl From<&LinkingEntitySet> for LinkingEntitySetBuilder {
    fn from(les: &LinkingEntitySet) -> Self {
        Self {
            entity_set: Some(les.entity_set.clone()),
            linking_properties: Some(les.linking_properties.clone()),
        }
    }
}

impl ModelBuilder for LinkingEntitySetBuilder {
    type Model = LinkingEntitySet;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(LinkingEntitySet::NAME, value)?;
        let mut builder = Self::new();
        if let Some(entity_set) = obj.object("entitySet")? {
            builder = builder.set_entity_set(nested!(EntitySet, "entitySet", entity_set)?)?;
        }
        if let Some(items) = obj.array("linkingProperties")? {
            let entries = fields::each(items, |item| {
                let map = item
                    .as_object()
                    .ok_or_else(|| ValidationError::invalid("linkingProperties", "an array of objects"))?;
                map.iter()
                    .map(|(k, v)| {
                        v.as_str()
                            .map(|v| (k.clone(), v.to_string()))
                            .ok_or_else(|| ValidationError::invalid("linkingProperties", "an array of UUID maps"))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?;
            builder = builder.set_linking_properties(entries)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<LinkingEntitySet, ValidationError> {
        Ok(LinkingEntitySet {
            entity_set: self.entity_set.clone().ok_or(ValidationError::missing("entitySet"))?,
            linking_properties: self.linking_properties.clone().unwrap_or_default(),
        })
    }
}

model_contract!(LinkingEntitySet, LinkingEntitySetBuilder, is_valid_linking_entity_set);

// ─── LinkingEntityType ───────────────────────────────────────────────

/// The merged entity type produced by linking several entity types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingEntityType {
    entity_type: EntityType,
    entity_type_ids: UniqueSet<Uuid>,
    deidentified: bool,
}

impl LinkingEntityType {
    /// The merged entity type.
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// The entity types being linked.
    pub fn entity_type_ids(&self) -> &UniqueSet<Uuid> {
        &self.entity_type_ids
    }

    /// Whether linked entities are de-identified.
    pub fn deidentified(&self) -> bool {
        self.deidentified
    }
}

/// Builder for [`LinkingEntityType`].
#[derive(Debug, Clone, Default)]
pub struct LinkingEntityTypeBuilder {
    entity_type: Option<EntityType>,
    entity_type_ids: Option<UniqueSet<Uuid>>,
    deidentified: Option<bool>,
}

impl LinkingEntityTypeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merged entity type.
    pub fn set_entity_type(mut self, entity_type: EntityType) -> Result<Self, ValidationError> {
        self.entity_type = Some(entity_type);
        Ok(self)
    }

    /// Set the entity types being linked; must be non-empty.
    pub fn set_entity_type_ids<I>(mut self, ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.entity_type_ids = Some(fields::non_empty_uuid_set("entityTypeIds", ids)?);
        Ok(self)
    }

    /// Set whether linked entities are de-identified.
    pub fn set_deidentified(mut self, deidentified: bool) -> Result<Self, ValidationError> {
        self.deidentified = Some(deidentified);
        Ok(self)
    }
}

impl From<&LinkingEntityType> for LinkingEntityTypeBuilder {
    fn from(linking: &LinkingEntityType) -> Self {
        Self {
            entity_type: Some(linking.entity_type.clone()),
            entity_type_ids: Some(linking.entity_type_ids.clone()),
            deidentified: Some(linking.deidentified),
        }
    }
}

impl ModelBuilder for LinkingEntityTypeBuilder {
    type Model = LinkingEntityType;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(LinkingEntityType::NAME, value)?;
        let mut builder = Self::new();
        if let Some(entity_type) = obj.object("entityType")? {
            builder = builder.set_entity_type(nested!(EntityType, "entityType", entity_type)?)?;
        }
        if let Some(ids) = obj.str_array("entityTypeIds")? {
            builder = builder.set_entity_type_ids(ids)?;
        }
        if let Some(deidentified) = obj.bool("deidentified")? {
            builder = builder.set_deidentified(deidentified)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<LinkingEntityType, ValidationError> {
        Ok(LinkingEntityType {
            entity_type: self
                .entity_type
                .clone()
                .ok_or(ValidationError::missing("entityType"))?,
            entity_type_ids: self
                .entity_type_ids
                .clone()
                .ok_or(ValidationError::missing("entityTypeIds"))?,
            deidentified: self.deidentified.unwrap_or(false),
        })
    }
}

model_contract!(LinkingEntityType, LinkingEntityTypeBuilder, is_valid_linking_entity_type);

// ─── LinkingRequest ──────────────────────────────────────────────────

/// A request to link entity sets, and which properties to return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingRequest {
    linking_entity_set: LinkingEntitySet,
    result_property_type_ids: UniqueSet<Uuid>,
}

impl LinkingRequest {
    /// What to link.
    pub fn linking_entity_set(&self) -> &LinkingEntitySet {
        &self.linking_entity_set
    }

    /// Property types included in the linked output.
    pub fn result_property_type_ids(&self) -> &UniqueSet<Uuid> {
        &self.result_property_type_ids
    }
}

/// Builder for [`LinkingRequest`].
#[derive(Debug, Clone, Default)]
pub struct LinkingRequestBuilder {
    linking_entity_set: Option<LinkingEntitySet>,
    result_property_type_ids: Option<UniqueSet<Uuid>>,
}

impl LinkingRequestBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set what to link.
    pub fn set_linking_entity_set(mut self, les: LinkingEntitySet) -> Result<Self, ValidationError> {
        self.linking_entity_set = Some(les);
        Ok(self)
    }

    /// Set the property types included in the output.
    pub fn set_result_property_type_ids<I>(mut self, ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.result_property_type_ids = Some(fields::uuid_set("resultPropertyTypeIds", ids)?);
        Ok(self)
    }
}

impl From<&LinkingRequest> for LinkingRequestBuilder {
    fn from(request: &LinkingRequest) -> Self {
        Self {
            linking_entity_set: Some(request.linking_entity_set.clone()),
            result_property_type_ids: Some(request.result_property_type_ids.clone()),
        }
    }
}

impl ModelBuilder for LinkingRequestBuilder {
    type Model = LinkingRequest;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(LinkingRequest::NAME, value)?;
        let mut builder = Self::new();
        if let Some(les) = obj.object("linkingEntitySet")? {
            builder = builder.set_linking_entity_set(nested!(LinkingEntitySet, "linkingEntitySet", les)?)?;
        }
        if let Some(ids) = obj.str_array("resultPropertyTypeIds")? {
            builder = builder.set_result_property_type_ids(ids)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<LinkingRequest, ValidationError> {
        Ok(LinkingRequest {
            linking_entity_set: self
                .linking_entity_set
                .clone()
                .ok_or(ValidationError::missing("linkingEntitySet"))?,
            result_property_type_ids: self.result_property_type_ids.clone().unwrap_or_default(),
        })
    }
}

model_contract!(LinkingRequest, LinkingRequestBuilder, is_valid_linking_request);
