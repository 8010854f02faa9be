//! # Data Sources
//!
//! A titled grouping of entity sets fed from one upstream system.

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// An upstream system and the entity sets it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    entity_set_ids: UniqueSet<Uuid>,
}

impl DataSource {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Entity sets fed by this source.
    pub fn entity_set_ids(&self) -> &UniqueSet<Uuid> {
        &self.entity_set_ids
    }
}

/// Builder for [`DataSource`].
#[derive(Debug, Clone, Default)]
pub struct DataSourceBuilder {
    id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    entity_set_ids: Option<UniqueSet<Uuid>>,
}

impl DataSourceBuilder {
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

    /// Set the entity sets fed by this source.
    pub fn set_entity_set_ids<I>(mut self, ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.entity_set_ids = Some(fields::uuid_set("entitySetIds", ids)?);
        Ok(self)
    }
}

impl From<&DataSource> for DataSourceBuilder {
    fn from(source: &DataSource) -> Self {
        Self {
            id: source.id,
            title: Some(source.title.clone()),
            description: source.description.clone(),
            entity_set_ids: Some(source.entity_set_ids.clone()),
        }
    }
}

impl ModelBuilder for DataSourceBuilder {
    type Model = DataSource;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(DataSource::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(ids) = obj.str_array("entitySetIds")? {
            builder = builder.set_entity_set_ids(ids)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<DataSource, ValidationError> {
        Ok(DataSource {
            id: self.id,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            entity_set_ids: self.entity_set_ids.clone().unwrap_or_default(),
        })
    }
}

model_contract!(DataSource, DataSourceBuilder, is_valid_data_source);
