//! # Principals
//!
//! A principal is anything permissions can be granted to: a user, a role,
//! or an organization. It is identified by its kind plus a string id.

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::types::PrincipalType;

/// A user, role, or organization that permissions are granted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Principal {
    #[serde(rename = "type")]
    principal_type: PrincipalType,
    id: String,
}

impl Principal {
    /// The principal's kind.
    pub fn principal_type(&self) -> PrincipalType {
        self.principal_type
    }

    /// The principal's id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Builder for [`Principal`].
#[derive(Debug, Clone, Default)]
pub struct PrincipalBuilder {
    principal_type: Option<PrincipalType>,
    id: Option<String>,
}

impl PrincipalBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the principal kind (`ORGANIZATION`, `ROLE`, `USER`).
    pub fn set_type(mut self, principal_type: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.principal_type = Some(fields::member("type", principal_type)?);
        Ok(self)
    }

    /// Set the principal id.
    pub fn set_id(mut self, id: impl Into<String>) -> Result<Self, ValidationError> {
        self.id = Some(fields::non_empty_string("id", id)?);
        Ok(self)
    }
}

impl From<&Principal> for PrincipalBuilder {
    fn from(principal: &Principal) -> Self {
        Self {
            principal_type: Some(principal.principal_type),
            id: Some(principal.id.clone()),
        }
    }
}

impl ModelBuilder for PrincipalBuilder {
    type Model = Principal;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Principal::NAME, value)?;
        let mut builder = Self::new();
        if let Some(principal_type) = obj.str("type")? {
            builder = builder.set_type(principal_type)?;
        }
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Principal, ValidationError> {
        Ok(Principal {
            principal_type: self.principal_type.ok_or(ValidationError::missing("type"))?,
            id: self.id.clone().ok_or(ValidationError::missing("id"))?,
        })
    }
}

model_contract!(Principal, PrincipalBuilder, is_valid_principal);
