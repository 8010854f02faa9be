//! # Organizations and Roles
//!
//! An organization groups member principals, the roles defined within it,
//! the email domains that auto-enroll users, and the apps it has installed.

use lattice_core::{fields, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::principal::Principal;

// ─── Role ────────────────────────────────────────────────────────────

/// A role defined within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    organization_id: Uuid,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
}

impl Role {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The owning organization.
    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The role's principal, if assigned.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Builder for [`Role`].
#[derive(Debug, Clone, Default)]
pub struct RoleBuilder {
    id: Option<Uuid>,
    organization_id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    principal: Option<Principal>,
}

impl RoleBuilder {
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

    /// Set the owning organization.
    pub fn set_organization_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.organization_id = Some(fields::uuid("organizationId", id)?);
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

    /// Set the role's principal.
    pub fn set_principal(mut self, principal: Principal) -> Result<Self, ValidationError> {
        self.principal = Some(principal);
        Ok(self)
    }
}

impl From<&Role> for RoleBuilder {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            organization_id: Some(role.organization_id),
            title: Some(role.title.clone()),
            description: role.description.clone(),
            principal: role.principal.clone(),
        }
    }
}

impl ModelBuilder for RoleBuilder {
    type Model = Role;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Role::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(organization_id) = obj.str("organizationId")? {
            builder = builder.set_organization_id(organization_id)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(principal) = obj.object("principal")? {
            builder = builder.set_principal(nested!(Principal, "principal", principal)?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Role, ValidationError> {
        Ok(Role {
            id: self.id,
            organization_id: self
                .organization_id
                .ok_or(ValidationError::missing("organizationId"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            principal: self.principal.clone(),
        })
    }
}

model_contract!(Role, RoleBuilder, is_valid_role);

// ─── Organization ────────────────────────────────────────────────────

/// An organization and its membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
    members: UniqueSet<Principal>,
    roles: Vec<Role>,
    emails: UniqueSet<String>,
    apps: UniqueSet<Uuid>,
}

impl Organization {
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

    /// The organization's own principal.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Member principals.
    pub fn members(&self) -> &UniqueSet<Principal> {
        &self.members
    }

    /// Roles defined in the organization, in the order given.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Email domains that auto-enroll users.
    pub fn emails(&self) -> &UniqueSet<String> {
        &self.emails
    }

    /// Installed app ids.
    pub fn apps(&self) -> &UniqueSet<Uuid> {
        &self.apps
    }
}

/// Builder for [`Organization`].
#[derive(Debug, Clone, Default)]
pub struct OrganizationBuilder {
    id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    principal: Option<Principal>,
    members: Option<UniqueSet<Principal>>,
    roles: Option<Vec<Role>>,
    emails: Option<UniqueSet<String>>,
    apps: Option<UniqueSet<Uuid>>,
}

impl OrganizationBuilder {
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

    /// Set the organization's principal.
    pub fn set_principal(mut self, principal: Principal) -> Result<Self, ValidationError> {
        self.principal = Some(principal);
        Ok(self)
    }

    /// Set the members. Duplicates are dropped.
    pub fn set_members(mut self, members: impl IntoIterator<Item = Principal>) -> Result<Self, ValidationError> {
        self.members = Some(members.into_iter().collect());
        Ok(self)
    }

    /// Set the roles. Repeated roles are dropped, first occurrence kept.
    pub fn set_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Result<Self, ValidationError> {
        self.roles = Some(fields::dedup_list(roles));
        Ok(self)
    }

    /// Set the auto-enrollment email domains.
    pub fn set_emails<I>(mut self, emails: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.emails = Some(fields::string_set("emails", emails)?);
        Ok(self)
    }

    /// Set the installed app ids.
    pub fn set_apps<I>(mut self, apps: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.apps = Some(fields::uuid_set("apps", apps)?);
        Ok(self)
    }
}

impl From<&Organization> for OrganizationBuilder {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id,
            title: Some(org.title.clone()),
            description: org.description.clone(),
            principal: org.principal.clone(),
            members: Some(org.members.clone()),
            roles: Some(org.roles.clone()),
            emails: Some(org.emails.clone()),
            apps: Some(org.apps.clone()),
        }
    }
}

impl ModelBuilder for OrganizationBuilder {
    type Model = Organization;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Organization::NAME, value)?;
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
        if let Some(principal) = obj.object("principal")? {
            builder = builder.set_principal(nested!(Principal, "principal", principal)?)?;
        }
        if let Some(members) = obj.array("members")? {
            builder = builder.set_members(fields::each(members, |m| nested!(Principal, "members", m))?)?;
        }
        if let Some(roles) = obj.array("roles")? {
            builder = builder.set_roles(fields::each(roles, |r| nested!(Role, "roles", r))?)?;
        }
        if let Some(emails) = obj.str_array("emails")? {
            builder = builder.set_emails(emails)?;
        }
        if let Some(apps) = obj.str_array("apps")? {
            builder = builder.set_apps(apps)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Organization, ValidationError> {
        Ok(Organization {
            id: self.id,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            principal: self.principal.clone(),
            members: self.members.clone().unwrap_or_default(),
            roles: self.roles.clone().unwrap_or_default(),
            emails: self.emails.clone().unwrap_or_default(),
            apps: self.apps.clone().unwrap_or_default(),
        })
    }
}

model_contract!(Organization, OrganizationBuilder, is_valid_organization);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::PrincipalBuilder;
    use crate::types::PrincipalType;
    use serde_json::json;

    const ORG_ID: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";
    const APP_ID: &str = "0c8be4b7-0bd5-4dd1-a623-da78871c9d0e";

    fn user(id: &str) -> Principal {
        PrincipalBuilder::new()
            .set_type(PrincipalType::User)
            .unwrap()
            .set_id(id)
            .unwrap()
            .build()
            .unwrap()
    }

    fn role(title: &str) -> Role {
        RoleBuilder::new()
            .set_organization_id(ORG_ID)
            .unwrap()
            .set_title(title)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn role_minimal() {
        assert_eq!(
            role("admin").to_wire_object().unwrap(),
            json!({"organizationId": ORG_ID, "title": "admin"})
        );
    }

    #[test]
    fn role_required_fields() {
        assert_eq!(
            RoleBuilder::new().set_title("t").unwrap().build().unwrap_err(),
            ValidationError::missing("organizationId")
        );
        assert_eq!(
            RoleBuilder::new().set_organization_id(ORG_ID).unwrap().build().unwrap_err(),
            ValidationError::missing("title")
        );
        assert!(RoleBuilder::new().set_organization_id("").is_err());
    }

    #[test]
    fn organization_defaults() {
        let org = OrganizationBuilder::new().set_title("OpenLattice").unwrap().build().unwrap();
        assert_eq!(
            org.to_wire_object().unwrap(),
            json!({"title": "OpenLattice", "members": [], "roles": [], "emails": [], "apps": []})
        );
    }

    #[test]
    fn organization_dedups_collections() {
        let org = OrganizationBuilder::new()
            .set_title("OpenLattice")
            .unwrap()
            .set_members([user("a"), user("b"), user("a")])
            .unwrap()
            .set_roles([role("admin"), role("admin"), role("viewer")])
            .unwrap()
            .set_emails(["openlattice.com", "openlattice.com"])
            .unwrap()
            .set_apps([APP_ID, APP_ID])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(org.members().len(), 2);
        assert_eq!(org.roles().len(), 2);
        assert_eq!(org.emails().len(), 1);
        assert_eq!(org.apps().len(), 1);
        assert_eq!(org.to_builder().build().unwrap(), org);
    }

    #[test]
    fn organization_from_object() {
        let value = json!({
            "title": "OpenLattice",
            "principal": {"type": "ORGANIZATION", "id": "org"},
            "members": [{"type": "USER", "id": "a"}],
            "roles": [{"organizationId": ORG_ID, "title": "admin"}],
            "emails": ["openlattice.com"],
            "apps": [APP_ID]
        });
        assert!(is_valid_organization(&value));
        assert_eq!(Organization::try_from_value(&value).unwrap().to_wire_object().unwrap(), value);
        assert!(!is_valid_organization(&json!({"title": "x", "roles": [{"title": "no org"}]})));
        assert!(!is_valid_organization(&json!({"title": "x", "emails": [""]})));
    }
}
