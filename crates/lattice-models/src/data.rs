//! # Entity Data
//!
//! Keys that address stored entities and edges, and the bulk-write payload
//! ([`DataGraph`]) that creates entities together with the associations
//! between them.
//!
//! ## Invariants
//!
//! - Entity data is keyed by property type id; each property holds an
//!   ordered list of non-null JSON values.
//! - Each end of a [`DataAssociation`] names its entity by exactly one of
//!   an index into the same graph's `entities` or an existing entity key id.
//! - Models holding raw JSON values hash them structurally, with object
//!   keys in sorted order, so equal values hash equally.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use lattice_core::validators::is_defined;
use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Property values of one entity, keyed by property type id.
pub type EntityData = BTreeMap<Uuid, Vec<Value>>;

fn entity_data<I, K, V>(field: &'static str, data: I) -> Result<EntityData, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: UuidInput,
    V: IntoIterator<Item = Value>,
{
    let mut parsed = EntityData::new();
    for (property_type_id, values) in fields::uuid_keyed(field, data)? {
        let values: Vec<Value> = values.into_iter().collect();
        if !values.iter().all(is_defined) {
            return Err(ValidationError::invalid(field, "an object of non-null value arrays"));
        }
        parsed.insert(property_type_id, values);
    }
    Ok(parsed)
}

fn read_entity_data(
    field: &'static str,
    map: &Map<String, Value>,
) -> Result<Vec<(String, Vec<Value>)>, ValidationError> {
    map.iter()
        .map(|(k, v)| match v {
            Value::Array(values) => Ok((k.clone(), values.clone())),
            _ => Err(ValidationError::invalid(field, "an object of value arrays")),
        })
        .collect()
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => n.hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            // sorted, so the hash does not depend on the map's iteration order
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            keys.len().hash(state);
            for key in keys {
                key.hash(state);
                hash_value(&map[key], state);
            }
        }
    }
}

fn hash_entity_data<H: Hasher>(data: &EntityData, state: &mut H) {
    data.len().hash(state);
    for (property_type_id, values) in data {
        property_type_id.hash(state);
        values.len().hash(state);
        for value in values {
            hash_value(value, state);
        }
    }
}

// ─── EntityDataKey ───────────────────────────────────────────────────

/// Address of one stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDataKey {
    entity_set_id: Uuid,
    entity_key_id: Uuid,
}

impl EntityDataKey {
    /// The entity set holding the entity.
    pub fn entity_set_id(&self) -> Uuid {
        self.entity_set_id
    }

    /// The entity's key id within the set.
    pub fn entity_key_id(&self) -> Uuid {
        self.entity_key_id
    }
}

/// Builder for [`EntityDataKey`].
#[derive(Debug, Clone, Default)]
pub struct EntityDataKeyBuilder {
    entity_set_id: Option<Uuid>,
    entity_key_id: Option<Uuid>,
}

impl EntityDataKeyBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entity set.
    pub fn set_entity_set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.entity_set_id = Some(fields::uuid("entitySetId", id)?);
        Ok(self)
    }

    /// Set the entity key id.
    pub fn set_entity_key_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.entity_key_id = Some(fields::uuid("entityKeyId", id)?);
        Ok(self)
    }
}

impl From<&EntityDataKey> for EntityDataKeyBuilder {
    fn from(key: &EntityDataKey) -> Self {
        Self {
            entity_set_id: Some(key.entity_set_id),
            entity_key_id: Some(key.entity_key_id),
        }
    }
}

impl ModelBuilder for EntityDataKeyBuilder {
    type Model = EntityDataKey;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(EntityDataKey::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("entitySetId")? {
            builder = builder.set_entity_set_id(id)?;
        }
        if let Some(id) = obj.str("entityKeyId")? {
            builder = builder.set_entity_key_id(id)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<EntityDataKey, ValidationError> {
        Ok(EntityDataKey {
            entity_set_id: self.entity_set_id.ok_or(ValidationError::missing("entitySetId"))?,
            entity_key_id: self.entity_key_id.ok_or(ValidationError::missing("entityKeyId"))?,
        })
    }
}

model_contract!(EntityDataKey, EntityDataKeyBuilder, is_valid_entity_data_key);

// ─── DataEdgeKey ─────────────────────────────────────────────────────

/// Address of one stored edge: its source, destination, and edge entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DataEdgeKey {
    src: EntityDataKey,
    dst: EntityDataKey,
    edge: EntityDataKey,
}

impl DataEdgeKey {
    /// Source entity.
    pub fn src(&self) -> &EntityDataKey {
        &self.src
    }

    /// Destination entity.
    pub fn dst(&self) -> &EntityDataKey {
        &self.dst
    }

    /// The association entity.
    pub fn edge(&self) -> &EntityDataKey {
        &self.edge
    }
}

/// Builder for [`DataEdgeKey`].
#[derive(Debug, Clone, Default)]
pub struct DataEdgeKeyBuilder {
    src: Option<EntityDataKey>,
    dst: Option<EntityDataKey>,
    edge: Option<EntityDataKey>,
}

impl DataEdgeKeyBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source entity.
    pub fn set_src(mut self, src: EntityDataKey) -> Result<Self, ValidationError> {
        self.src = Some(src);
        Ok(self)
    }

    /// Set the destination entity.
    pub fn set_dst(mut self, dst: EntityDataKey) -> Result<Self, ValidationError> {
        self.dst = Some(dst);
        Ok(self)
    }

    /// Set the association entity.
    pub fn set_edge(mut self, edge: EntityDataKey) -> Result<Self, ValidationError> {
        self.edge = Some(edge);
        Ok(self)
    }
}

impl From<&DataEdgeKey> for DataEdgeKeyBuilder {
    fn from(key: &DataEdgeKey) -> Self {
        Self {
            src: Some(key.src),
            dst: Some(key.dst),
            edge: Some(key.edge),
        }
    }
}

impl ModelBuilder for DataEdgeKeyBuilder {
    type Model = DataEdgeKey;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(DataEdgeKey::NAME, value)?;
        let mut builder = Self::new();
        if let Some(src) = obj.object("src")? {
            builder = builder.set_src(nested!(EntityDataKey, "src", src)?)?;
        }
        if let Some(dst) = obj.object("dst")? {
            builder = builder.set_dst(nested!(EntityDataKey, "dst", dst)?)?;
        }
        if let Some(edge) = obj.object("edge")? {
            builder = builder.set_edge(nested!(EntityDataKey, "edge", edge)?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<DataEdgeKey, ValidationError> {
        Ok(DataEdgeKey {
            src: self.src.ok_or(ValidationError::missing("src"))?,
            dst: self.dst.ok_or(ValidationError::missing("dst"))?,
            edge: self.edge.ok_or(ValidationError::missing("edge"))?,
        })
    }
}

model_contract!(DataEdgeKey, DataEdgeKeyBuilder, is_valid_data_edge_key);

// ─── DataAssociation ─────────────────────────────────────────────────

/// One association to create, with its property values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAssociation {
    src_entity_set_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    src_entity_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src_entity_key_id: Option<Uuid>,
    dst_entity_set_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    dst_entity_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dst_entity_key_id: Option<Uuid>,
    data: EntityData,
}

impl Hash for DataAssociation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.src_entity_set_id.hash(state);
        self.src_entity_index.hash(state);
        self.src_entity_key_id.hash(state);
        self.dst_entity_set_id.hash(state);
        self.dst_entity_index.hash(state);
        self.dst_entity_key_id.hash(state);
        hash_entity_data(&self.data, state);
    }
}

impl DataAssociation {
    /// Entity set of the source entity.
    pub fn src_entity_set_id(&self) -> Uuid {
        self.src_entity_set_id
    }

    /// Index of the source entity among the graph's new entities of that set.
    pub fn src_entity_index(&self) -> Option<u64> {
        self.src_entity_index
    }

    /// Key id of an existing source entity.
    pub fn src_entity_key_id(&self) -> Option<Uuid> {
        self.src_entity_key_id
    }

    /// Entity set of the destination entity.
    pub fn dst_entity_set_id(&self) -> Uuid {
        self.dst_entity_set_id
    }

    /// Index of the destination entity among the graph's new entities of that set.
    pub fn dst_entity_index(&self) -> Option<u64> {
        self.dst_entity_index
    }

    /// Key id of an existing destination entity.
    pub fn dst_entity_key_id(&self) -> Option<Uuid> {
        self.dst_entity_key_id
    }

    /// Property values of the association entity.
    pub fn data(&self) -> &EntityData {
        &self.data
    }
}

/// Builder for [`DataAssociation`].
#[derive(Debug, Clone, Default)]
pub struct DataAssociationBuilder {
    src_entity_set_id: Option<Uuid>,
    src_entity_index: Option<u64>,
    src_entity_key_id: Option<Uuid>,
    dst_entity_set_id: Option<Uuid>,
    dst_entity_index: Option<u64>,
    dst_entity_key_id: Option<Uuid>,
    data: Option<EntityData>,
}

impl DataAssociationBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source entity set.
    pub fn set_src_entity_set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.src_entity_set_id = Some(fields::uuid("srcEntitySetId", id)?);
        Ok(self)
    }

    /// Point the source at a new entity of the same graph.
    pub fn set_src_entity_index(mut self, index: u64) -> Result<Self, ValidationError> {
        self.src_entity_index = Some(index);
        Ok(self)
    }

    /// Point the source at an existing entity. The empty string leaves it unset.
    pub fn set_src_entity_key_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("srcEntityKeyId", id)? {
            self.src_entity_key_id = Some(id);
        }
        Ok(self)
    }

    /// Set the destination entity set.
    pub fn set_dst_entity_set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.dst_entity_set_id = Some(fields::uuid("dstEntitySetId", id)?);
        Ok(self)
    }

    /// Point the destination at a new entity of the same graph.
    pub fn set_dst_entity_index(mut self, index: u64) -> Result<Self, ValidationError> {
        self.dst_entity_index = Some(index);
        Ok(self)
    }

    /// Point the destination at an existing entity. The empty string leaves it unset.
    pub fn set_dst_entity_key_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("dstEntityKeyId", id)? {
            self.dst_entity_key_id = Some(id);
        }
        Ok(self)
    }

    /// Set the association's property values.
    pub fn set_data<I, K, V>(mut self, data: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: UuidInput,
        V: IntoIterator<Item = Value>,
    {
        self.data = Some(entity_data("data", data)?);
        Ok(self)
    }
}

impl From<&DataAssociation> for DataAssociationBuilder {
    fn from(association: &DataAssociation) -> Self {
        Self {
            src_entity_set_id: Some(association.src_entity_set_id),
            src_entity_index: association.src_entity_index,
            src_entity_key_id: association.src_entity_key_id,
            dst_entity_set_id: Some(association.dst_entity_set_id),
            dst_entity_index: association.dst_entity_index,
            dst_entity_key_id: association.dst_entity_key_id,
            data: Some(association.data.clone()),
        }
    }
}

/// Exactly one of `index` and `key_id` must be set for each end.
fn check_end(
    index: Option<u64>,
    key_id: Option<Uuid>,
    index_field: &'static str,
    key_field: &'static str,
) -> Result<(), ValidationError> {
    match (index, key_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (None, None) => Err(ValidationError::missing(index_field)),
        (Some(_), Some(_)) => Err(ValidationError::invalid(
            key_field,
            "absent when an entity index is given",
        )),
    }
}

impl ModelBuilder for DataAssociationBuilder {
    type Model = DataAssociation;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(DataAssociation::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("srcEntitySetId")? {
            builder = builder.set_src_entity_set_id(id)?;
        }
        if let Some(index) = obj.u64("srcEntityIndex")? {
            builder = builder.set_src_entity_index(index)?;
        }
        if let Some(id) = obj.str("srcEntityKeyId")? {
            builder = builder.set_src_entity_key_id(id)?;
        }
        if let Some(id) = obj.str("dstEntitySetId")? {
            builder = builder.set_dst_entity_set_id(id)?;
        }
        if let Some(index) = obj.u64("dstEntityIndex")? {
            builder = builder.set_dst_entity_index(index)?;
        }
        if let Some(id) = obj.str("dstEntityKeyId")? {
            builder = builder.set_dst_entity_key_id(id)?;
        }
        if let Some(data) = obj.map("data")? {
            builder = builder.set_data(read_entity_data("data", data)?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<DataAssociation, ValidationError> {
        let src_entity_set_id = self
            .src_entity_set_id
            .ok_or(ValidationError::missing("srcEntitySetId"))?;
        let dst_entity_set_id = self
            .dst_entity_set_id
            .ok_or(ValidationError::missing("dstEntitySetId"))?;
        check_end(
            self.src_entity_index,
            self.src_entity_key_id,
            "srcEntityIndex",
            "srcEntityKeyId",
        )?;
        check_end(
            self.dst_entity_index,
            self.dst_entity_key_id,
            "dstEntityIndex",
            "dstEntityKeyId",
        )?;
        Ok(DataAssociation {
            src_entity_set_id,
            src_entity_index: self.src_entity_index,
            src_entity_key_id: self.src_entity_key_id,
            dst_entity_set_id,
            dst_entity_index: self.dst_entity_index,
            dst_entity_key_id: self.dst_entity_key_id,
            data: self.data.clone().unwrap_or_default(),
        })
    }
}

model_contract!(DataAssociation, DataAssociationBuilder, is_valid_data_association);

// ─── DataGraph ───────────────────────────────────────────────────────

/// New entities keyed by entity set id, with associations between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataGraph {
    entities: BTreeMap<Uuid, Vec<EntityData>>,
    associations: BTreeMap<Uuid, Vec<DataAssociation>>,
}

impl Hash for DataGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entities.len().hash(state);
        for (entity_set_id, entities) in &self.entities {
            entity_set_id.hash(state);
            entities.len().hash(state);
            for data in entities {
                hash_entity_data(data, state);
            }
        }
        self.associations.hash(state);
    }
}

impl DataGraph {
    /// New entities per entity set, in index order.
    pub fn entities(&self) -> &BTreeMap<Uuid, Vec<EntityData>> {
        &self.entities
    }

    /// Associations per association entity set.
    pub fn associations(&self) -> &BTreeMap<Uuid, Vec<DataAssociation>> {
        &self.associations
    }
}

/// Builder for [`DataGraph`].
#[derive(Debug, Clone, Default)]
pub struct DataGraphBuilder {
    entities: Option<BTreeMap<Uuid, Vec<EntityData>>>,
    associations: Option<BTreeMap<Uuid, Vec<DataAssociation>>>,
}

impl DataGraphBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new entities, keyed by entity set id.
    pub fn set_entities<I, K>(mut self, entities: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Vec<EntityData>)>,
        K: UuidInput,
    {
        self.entities = Some(fields::uuid_keyed("entities", entities)?);
        Ok(self)
    }

    /// Set the associations, keyed by association entity set id.
    pub fn set_associations<I, K>(mut self, associations: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Vec<DataAssociation>)>,
        K: UuidInput,
    {
        self.associations = Some(fields::uuid_keyed("associations", associations)?);
        Ok(self)
    }
}

impl From<&DataGraph> for DataGraphBuilder {
    fn from(graph: &DataGraph) -> Self {
        Self {
            entities: Some(graph.entities.clone()),
            associations: Some(graph.associations.clone()),
        }
    }
}

impl ModelBuilder for DataGraphBuilder {
    type Model = DataGraph;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(DataGraph::NAME, value)?;
        let mut builder = Self::new();
        if let Some(entities) = obj.map("entities")? {
            let mut parsed = Vec::with_capacity(entities.len());
            for (entity_set_id, rows) in entities {
                let rows = rows
                    .as_array()
                    .ok_or_else(|| ValidationError::invalid("entities", "an object of entity arrays"))?;
                let rows = fields::each(rows, |row| {
                    let row = row
                        .as_object()
                        .ok_or_else(|| ValidationError::invalid("entities", "an object of entity arrays"))?;
                    entity_data("entities", read_entity_data("entities", row)?)
                })?;
                parsed.push((entity_set_id.as_str(), rows));
            }
            builder = builder.set_entities(parsed)?;
        }
        if let Some(associations) = obj.map("associations")? {
            let mut parsed = Vec::with_capacity(associations.len());
            for (entity_set_id, items) in associations {
                let items = items
                    .as_array()
                    .ok_or_else(|| ValidationError::invalid("associations", "an object of association arrays"))?;
                let items = fields::each(items, |item| nested!(DataAssociation, "associations", item))?;
                parsed.push((entity_set_id.as_str(), items));
            }
            builder = builder.set_associations(parsed)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<DataGraph, ValidationError> {
        Ok(DataGraph {
            entities: self.entities.clone().unwrap_or_default(),
            associations: self.associations.clone().unwrap_or_default(),
        })
    }
}

model_contract!(DataGraph, DataGraphBuilder, is_valid_data_graph);
