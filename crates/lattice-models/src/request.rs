//! # Permission Requests
//!
//! A [`Request`] asks for permissions on a securable object; a
//! [`RequestStatus`] records who asked and where the request stands.

use lattice_core::{fields, AclKey, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::principal::Principal;
use crate::types::{PermissionType, RequestStateType};

// ─── Request ─────────────────────────────────────────────────────────

/// A request for permissions on one securable object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    acl_key: AclKey,
    permissions: UniqueSet<PermissionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl Request {
    /// The object permissions are requested on.
    pub fn acl_key(&self) -> &AclKey {
        &self.acl_key
    }

    /// The requested permissions.
    pub fn permissions(&self) -> &UniqueSet<PermissionType> {
        &self.permissions
    }

    /// Free-text justification.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    acl_key: Option<AclKey>,
    permissions: Option<UniqueSet<PermissionType>>,
    reason: Option<String>,
}

impl RequestBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acl key.
    pub fn set_acl_key<I>(mut self, acl_key: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.acl_key = Some(AclKey::parse("aclKey", acl_key)?);
        Ok(self)
    }

    /// Set the requested permissions; must be non-empty.
    pub fn set_permissions<I>(mut self, permissions: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.permissions = Some(fields::non_empty_member_set("permissions", permissions)?);
        Ok(self)
    }

    /// Set the justification. The empty string leaves it unset.
    pub fn set_reason(mut self, reason: impl Into<String>) -> Result<Self, ValidationError> {
        if let Some(reason) = fields::optional_string("reason", reason)? {
            self.reason = Some(reason);
        }
        Ok(self)
    }
}

impl From<&Request> for RequestBuilder {
    fn from(request: &Request) -> Self {
        Self {
            acl_key: Some(request.acl_key.clone()),
            permissions: Some(request.permissions.clone()),
            reason: request.reason.clone(),
        }
    }
}

impl ModelBuilder for RequestBuilder {
    type Model = Request;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Request::NAME, value)?;
        let mut builder = Self::new();
        if let Some(acl_key) = obj.str_array("aclKey")? {
            builder = builder.set_acl_key(acl_key)?;
        }
        if let Some(permissions) = obj.str_array("permissions")? {
            builder = builder.set_permissions(permissions)?;
        }
        if let Some(reason) = obj.str("reason")? {
            builder = builder.set_reason(reason)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Request, ValidationError> {
        Ok(Request {
            acl_key: self.acl_key.clone().ok_or(ValidationError::missing("aclKey"))?,
            permissions: self
                .permissions
                .clone()
                .ok_or(ValidationError::missing("permissions"))?,
            reason: self.reason.clone(),
        })
    }
}

model_contract!(Request, RequestBuilder, is_valid_request);

// ─── RequestStatus ───────────────────────────────────────────────────

/// A permission request together with its requester and decision state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RequestStatus {
    request: Request,
    status: RequestStateType,
    principal: Principal,
}

impl RequestStatus {
    /// The request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Where the request stands.
    pub fn status(&self) -> RequestStateType {
        self.status
    }

    /// Who made the request.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Builder for [`RequestStatus`].
#[derive(Debug, Clone, Default)]
pub struct RequestStatusBuilder {
    request: Option<Request>,
    status: Option<RequestStateType>,
    principal: Option<Principal>,
}

impl RequestStatusBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request.
    pub fn set_request(mut self, request: Request) -> Result<Self, ValidationError> {
        self.request = Some(request);
        Ok(self)
    }

    /// Set the state (`SUBMITTED`, `APPROVED`, `DECLINED`).
    pub fn set_status(mut self, status: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.status = Some(fields::member("status", status)?);
        Ok(self)
    }

    /// Set the requester.
    pub fn set_principal(mut self, principal: Principal) -> Result<Self, ValidationError> {
        self.principal = Some(principal);
        Ok(self)
    }
}

impl From<&RequestStatus> for RequestStatusBuilder {
    fn from(status: &RequestStatus) -> Self {
        Self {
            request: Some(status.request.clone()),
            status: Some(status.status),
            principal: Some(status.principal.clone()),
        }
    }
}

impl ModelBuilder for RequestStatusBuilder {
    type Model = RequestStatus;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(RequestStatus::NAME, value)?;
        let mut builder = Self::new();
        if let Some(request) = obj.object("request")? {
            builder = builder.set_request(nested!(Request, "request", request)?)?;
        }
        if let Some(status) = obj.str("status")? {
            builder = builder.set_status(status)?;
        }
        if let Some(principal) = obj.object("principal")? {
            builder = builder.set_principal(nested!(Principal, "principal", principal)?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<RequestStatus, ValidationError> {
        Ok(RequestStatus {
            request: self.request.clone().ok_or(ValidationError::missing("request"))?,
            status: self.status.ok_or(ValidationError::missing("status"))?,
            principal: self.principal.clone().ok_or(ValidationError::missing("principal"))?,
        })
    }
}

model_contract!(RequestStatus, RequestStatusBuilder, is_valid_request_status);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";

    fn request() -> Request {
        RequestBuilder::new()
            .set_acl_key([KEY])
            .unwrap()
            .set_permissions(["READ"])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn reason_is_optional_and_omitted() {
        let request = request();
        assert_eq!(request.reason(), None);
        assert_eq!(
            request.to_wire_object().unwrap(),
            json!({"aclKey": [KEY], "permissions": ["READ"]})
        );
        let with_reason = request.to_builder().set_reason("audit").unwrap().build().unwrap();
        assert_eq!(with_reason.reason(), Some("audit"));
        assert_ne!(with_reason, request);
    }

    #[test]
    fn empty_reason_is_noop() {
        let built = request().to_builder().set_reason("").unwrap().build().unwrap();
        assert_eq!(built.reason(), None);
    }

    #[test]
    fn request_requires_key_and_permissions() {
        assert!(RequestBuilder::new().set_permissions(["READ"]).unwrap().build().is_err());
        assert!(RequestBuilder::new().set_acl_key([KEY]).unwrap().build().is_err());
    }

    #[test]
    fn request_status_from_object() {
        let value = json!({
            "request": {"aclKey": [KEY], "permissions": ["READ", "WRITE"], "reason": "r"},
            "status": "SUBMITTED",
            "principal": {"type": "USER", "id": "u"}
        });
        let status = RequestStatus::try_from_value(&value).unwrap();
        assert_eq!(status.status(), RequestStateType::Submitted);
        assert_eq!(status.to_wire_object().unwrap(), value);
        assert!(is_valid_request_status(&value));
    }

    #[test]
    fn request_status_rejects_unknown_state() {
        assert!(RequestStatusBuilder::new().set_status("PENDING").is_err());
        assert!(!is_valid_request_status(&json!({
            "request": {"aclKey": [KEY], "permissions": ["READ"]},
            "status": "PENDING",
            "principal": {"type": "USER", "id": "u"}
        })));
    }

    #[test]
    fn request_status_requires_all_fields() {
        let missing_principal = RequestStatusBuilder::new()
            .set_request(request())
            .unwrap()
            .set_status(RequestStateType::Approved)
            .unwrap()
            .build();
        assert_eq!(missing_principal.unwrap_err(), ValidationError::missing("principal"));
    }
}
