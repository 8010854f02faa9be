//! # Access Checks
//!
//! The payload of a permission check: does the caller hold these
//! permissions on this object?

use lattice_core::{fields, AclKey, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::types::PermissionType;

/// A query for a set of permissions on one securable object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheck {
    acl_key: AclKey,
    permissions: UniqueSet<PermissionType>,
}

impl AccessCheck {
    /// The object being checked.
    pub fn acl_key(&self) -> &AclKey {
        &self.acl_key
    }

    /// The permissions being checked.
    pub fn permissions(&self) -> &UniqueSet<PermissionType> {
        &self.permissions
    }
}

/// Builder for [`AccessCheck`].
#[derive(Debug, Clone, Default)]
pub struct AccessCheckBuilder {
    acl_key: Option<AclKey>,
    permissions: Option<UniqueSet<PermissionType>>,
}

impl AccessCheckBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acl key of the object to check.
    pub fn set_acl_key<I>(mut self, acl_key: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.acl_key = Some(AclKey::parse("aclKey", acl_key)?);
        Ok(self)
    }

    /// Set the permissions to check; must be non-empty.
    pub fn set_permissions<I>(mut self, permissions: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.permissions = Some(fields::non_empty_member_set("permissions", permissions)?);
        Ok(self)
    }
}

impl From<&AccessCheck> for AccessCheckBuilder {
    fn from(check: &AccessCheck) -> Self {
        Self {
            acl_key: Some(check.acl_key.clone()),
            permissions: Some(check.permissions.clone()),
        }
    }
}

impl ModelBuilder for AccessCheckBuilder {
    type Model = AccessCheck;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(AccessCheck::NAME, value)?;
        let mut builder = Self::new();
        if let Some(acl_key) = obj.str_array("aclKey")? {
            builder = builder.set_acl_key(acl_key)?;
        }
        if let Some(permissions) = obj.str_array("permissions")? {
            builder = builder.set_permissions(permissions)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<AccessCheck, ValidationError> {
        Ok(AccessCheck {
            acl_key: self.acl_key.clone().ok_or(ValidationError::missing("aclKey"))?,
            permissions: self
                .permissions
                .clone()
                .ok_or(ValidationError::missing("permissions"))?,
        })
    }
}

model_contract!(AccessCheck, AccessCheckBuilder, is_valid_access_check);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";

    #[test]
    fn malformed_acl_key_is_invalid_parameter() {
        let err = AccessCheckBuilder::new().set_acl_key(["not-a-uuid"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidParameter { field: "aclKey", .. }));
        assert!(!is_valid_access_check(&json!({"aclKey": ["not-a-uuid"], "permissions": ["READ"]})));
    }

    #[test]
    fn builds() {
        let check = AccessCheckBuilder::new()
            .set_acl_key([KEY])
            .unwrap()
            .set_permissions([PermissionType::Read, PermissionType::Read])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            check.to_wire_object().unwrap(),
            json!({"aclKey": [KEY], "permissions": ["READ"]})
        );
        assert!(is_valid_access_check(&check));
    }

    #[test]
    fn both_fields_required() {
        assert!(AccessCheckBuilder::new().set_acl_key([KEY]).unwrap().build().is_err());
        assert!(AccessCheckBuilder::new().set_permissions(["READ"]).unwrap().build().is_err());
    }

    #[test]
    fn empty_permissions_rejected() {
        let none: [&str; 0] = [];
        assert!(AccessCheckBuilder::new().set_permissions(none).is_err());
    }
}
