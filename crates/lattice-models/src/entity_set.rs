//! # Entity Sets
//!
//! A named collection of entities of one entity type.

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::types::EntitySetFlagType;

/// A named collection of entities of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    entity_type_id: Uuid,
    name: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    contacts: UniqueSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_id: Option<Uuid>,
    flags: UniqueSet<EntitySetFlagType>,
}

impl EntitySet {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Entity type of the members.
    pub fn entity_type_id(&self) -> Uuid {
        self.entity_type_id
    }

    /// Unique machine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Contact addresses of the owners.
    pub fn contacts(&self) -> &UniqueSet<String> {
        &self.contacts
    }

    /// The owning organization.
    pub fn organization_id(&self) -> Option<Uuid> {
        self.organization_id
    }

    /// Flags describing the set.
    pub fn flags(&self) -> &UniqueSet<EntitySetFlagType> {
        &self.flags
    }
}

/// Builder for [`EntitySet`].
#[derive(Debug, Clone, Default)]
pub struct EntitySetBuilder {
    id: Option<Uuid>,
    entity_type_id: Option<Uuid>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    contacts: Option<UniqueSet<String>>,
    organization_id: Option<Uuid>,
    flags: Option<UniqueSet<EntitySetFlagType>>,
}

impl EntitySetBuilder {
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

    /// Set the entity type of the members.
    pub fn set_entity_type_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.entity_type_id = Some(fields::uuid("entityTypeId", id)?);
        Ok(self)
    }

    /// Set the machine name.
    pub fn set_name(mut self, name: impl Into<String>) -> Result<Self, ValidationError> {
        self.name = Some(fields::non_empty_string("name", name)?);
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

    /// Set the contacts.
    pub fn set_contacts<I>(mut self, contacts: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.contacts = Some(fields::string_set("contacts", contacts)?);
        Ok(self)
    }

    /// Set the owning organization. The empty string leaves it unset.
    pub fn set_organization_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("organizationId", id)? {
            self.organization_id = Some(id);
        }
        Ok(self)
    }

    /// Set the flags.
    pub fn set_flags<I>(mut self, flags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.flags = Some(fields::member_set("flags", flags)?);
        Ok(self)
    }
}

impl From<&EntitySet> for EntitySetBuilder {
    fn from(es: &EntitySet) -> Self {
        Self {
            id: es.id,
            entity_type_id: Some(es.entity_type_id),
            name: Some(es.name.clone()),
            title: Some(es.title.clone()),
            description: es.description.clone(),
            contacts: Some(es.contacts.clone()),
            organization_id: es.organization_id,
            flags: Some(es.flags.clone()),
        }
    }
}

impl ModelBuilder for EntitySetBuilder {
    type Model = EntitySet;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(EntitySet::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(id) = obj.str("entityTypeId")? {
            builder = builder.set_entity_type_id(id)?;
        }
        if let Some(name) = obj.str("name")? {
            builder = builder.set_name(name)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(contacts) = obj.str_array("contacts")? {
            builder = builder.set_contacts(contacts)?;
        }
        if let Some(id) = obj.str("organizationId")? {
            builder = builder.set_organization_id(id)?;
        }
        if let Some(flags) = obj.str_array("flags")? {
            builder = builder.set_flags(flags)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<EntitySet, ValidationError> {
        Ok(EntitySet {
            id: self.id,
            entity_type_id: self
                .entity_type_id
                .ok_or(ValidationError::missing("entityTypeId"))?,
            name: self.name.clone().ok_or(ValidationError::missing("name"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            contacts: self.contacts.clone().unwrap_or_default(),
            organization_id: self.organization_id,
            flags: self.flags.clone().unwrap_or_default(),
        })
    }
}

model_contract!(EntitySet, EntitySetBuilder, is_valid_entity_set);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ET: &str = "00000000-0000-0000-0000-000000000001";

    fn people() -> EntitySetBuilder {
        EntitySetBuilder::new()
            .set_entity_type_id(ET)
            .unwrap()
            .set_name("people")
            .unwrap()
            .set_title("People")
            .unwrap()
    }

    #[test]
    fn defaults() {
        assert_eq!(
            people().build().unwrap().to_wire_object().unwrap(),
            json!({
                "entityTypeId": ET,
                "name": "people",
                "title": "People",
                "contacts": [],
                "flags": []
            })
        );
    }

    #[test]
    fn flags_are_a_set_of_members() {
        let es = people()
            .set_flags([EntitySetFlagType::Audit, EntitySetFlagType::Audit])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(es.flags().len(), 1);
        assert!(people().set_flags(["ARCHIVED"]).is_err());
    }

    #[test]
    fn each_required_field() {
        let cases = [
            (EntitySetBuilder::new().set_name("n").unwrap().set_title("t").unwrap(), "entityTypeId"),
            (EntitySetBuilder::new().set_entity_type_id(ET).unwrap().set_title("t").unwrap(), "name"),
            (EntitySetBuilder::new().set_entity_type_id(ET).unwrap().set_name("n").unwrap(), "title"),
        ];
        for (builder, field) in cases {
            assert_eq!(builder.build().unwrap_err(), ValidationError::missing(field));
        }
    }

    #[test]
    fn candidate_shapes_agree() {
        let es = people()
            .set_contacts(["ops@openlattice.com"])
            .unwrap()
            .set_organization_id("ec6865e6-e60e-424b-a071-6a9c1603d735")
            .unwrap()
            .build()
            .unwrap();
        let wire = es.to_wire_object().unwrap();
        let map: std::collections::BTreeMap<String, Value> =
            serde_json::from_value(wire.clone()).unwrap();
        assert!(is_valid_entity_set(&es));
        assert!(is_valid_entity_set(&wire));
        assert!(is_valid_entity_set(&map));
        assert_eq!(EntitySet::try_from_value(&wire).unwrap(), es);
    }
}
