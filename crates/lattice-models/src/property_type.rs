//! # Property Types
//!
//! A property type names a typed attribute that entity types carry, with
//! its EDM datatype and the indexing hints the server honors.

use lattice_core::{fields, Fqn, FqnSource, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::types::{AnalyzerType, EdmPrimitiveType, IndexType};

/// A typed attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(rename = "type")]
    type_fqn: Fqn,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    datatype: EdmPrimitiveType,
    schemas: UniqueSet<Fqn>,
    pii: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi_valued: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<AnalyzerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_type: Option<IndexType>,
    enum_values: UniqueSet<String>,
}

impl PropertyType {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The property type's name.
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

    /// EDM datatype of the values.
    pub fn datatype(&self) -> EdmPrimitiveType {
        self.datatype
    }

    /// Schemas this property type belongs to.
    pub fn schemas(&self) -> &UniqueSet<Fqn> {
        &self.schemas
    }

    /// Whether values are personally identifying.
    pub fn pii(&self) -> bool {
        self.pii
    }

    /// Whether an entity may hold several values, if specified.
    pub fn multi_valued(&self) -> Option<bool> {
        self.multi_valued
    }

    /// Full-text analyzer.
    pub fn analyzer(&self) -> Option<AnalyzerType> {
        self.analyzer
    }

    /// Storage index kind.
    pub fn index_type(&self) -> Option<IndexType> {
        self.index_type
    }

    /// Allowed values, when the property is enumerated.
    pub fn enum_values(&self) -> &UniqueSet<String> {
        &self.enum_values
    }
}

/// Builder for [`PropertyType`].
#[derive(Debug, Clone, Default)]
pub struct PropertyTypeBuilder {
    id: Option<Uuid>,
    type_fqn: Option<Fqn>,
    title: Option<String>,
    description: Option<String>,
    datatype: Option<EdmPrimitiveType>,
    schemas: Option<UniqueSet<Fqn>>,
    pii: Option<bool>,
    multi_valued: Option<bool>,
    analyzer: Option<AnalyzerType>,
    index_type: Option<IndexType>,
    enum_values: Option<UniqueSet<String>>,
}

impl PropertyTypeBuilder {
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

    /// Set the EDM datatype.
    pub fn set_datatype(mut self, datatype: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.datatype = Some(fields::member("datatype", datatype)?);
        Ok(self)
    }

    /// Set the schemas this property type belongs to.
    pub fn set_schemas<I>(mut self, schemas: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<FqnSource>,
    {
        self.schemas = Some(fields::fqn_set("schemas", schemas)?);
        Ok(self)
    }

    /// Mark values as personally identifying.
    pub fn set_pii(mut self, pii: bool) -> Result<Self, ValidationError> {
        self.pii = Some(pii);
        Ok(self)
    }

    /// Allow or forbid several values per entity.
    pub fn set_multi_valued(mut self, multi_valued: bool) -> Result<Self, ValidationError> {
        self.multi_valued = Some(multi_valued);
        Ok(self)
    }

    /// Set the analyzer. The empty string leaves it unset.
    pub fn set_analyzer(mut self, analyzer: impl AsRef<str>) -> Result<Self, ValidationError> {
        if let Some(analyzer) = fields::optional_member("analyzer", analyzer)? {
            self.analyzer = Some(analyzer);
        }
        Ok(self)
    }

    /// Set the index kind. The empty string leaves it unset.
    pub fn set_index_type(mut self, index_type: impl AsRef<str>) -> Result<Self, ValidationError> {
        if let Some(index_type) = fields::optional_member("indexType", index_type)? {
            self.index_type = Some(index_type);
        }
        Ok(self)
    }

    /// Set the allowed values.
    pub fn set_enum_values<I>(mut self, values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.enum_values = Some(fields::string_set("enumValues", values)?);
        Ok(self)
    }
}

impl From<&PropertyType> for PropertyTypeBuilder {
    fn from(pt: &PropertyType) -> Self {
        Self {
            id: pt.id,
            type_fqn: Some(pt.type_fqn.clone()),
            title: Some(pt.title.clone()),
            description: pt.description.clone(),
            datatype: Some(pt.datatype),
            schemas: Some(pt.schemas.clone()),
            pii: Some(pt.pii),
            multi_valued: pt.multi_valued,
            analyzer: pt.analyzer,
            index_type: pt.index_type,
            enum_values: Some(pt.enum_values.clone()),
        }
    }
}

impl ModelBuilder for PropertyTypeBuilder {
    type Model = PropertyType;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(PropertyType::NAME, value)?;
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
        if let Some(datatype) = obj.str("datatype")? {
            builder = builder.set_datatype(datatype)?;
        }
        if let Some(schemas) = obj.array("schemas")? {
            builder = builder.set_schemas(schemas)?;
        }
        if let Some(pii) = obj.bool("pii")? {
            builder = builder.set_pii(pii)?;
        }
        if let Some(multi_valued) = obj.bool("multiValued")? {
            builder = builder.set_multi_valued(multi_valued)?;
        }
        if let Some(analyzer) = obj.str("analyzer")? {
            builder = builder.set_analyzer(analyzer)?;
        }
        if let Some(index_type) = obj.str("indexType")? {
            builder = builder.set_index_type(index_type)?;
        }
        if let Some(values) = obj.str_array("enumValues")? {
            builder = builder.set_enum_values(values)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<PropertyType, ValidationError> {
        Ok(PropertyType {
            id: self.id,
            type_fqn: self.type_fqn.clone().ok_or(ValidationError::missing("type"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            datatype: self.datatype.ok_or(ValidationError::missing("datatype"))?,
            schemas: self.schemas.clone().unwrap_or_default(),
            pii: self.pii.unwrap_or(false),
            multi_valued: self.multi_valued,
            analyzer: self.analyzer,
            index_type: self.index_type,
            enum_values: self.enum_values.clone().unwrap_or_default(),
        })
    }
}

model_contract!(PropertyType, PropertyTypeBuilder, is_valid_property_type);
