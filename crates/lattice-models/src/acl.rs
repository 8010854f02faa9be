//! # Access Control Lists
//!
//! ```text
//! AclData ──▶ Acl ──▶ aclKey: [UUID, ...]   (order-significant)
//!                 └─▶ aces: [Ace, ...]      (ordered, deduplicated)
//!                          └─▶ principal + permissions (set)
//! ```
//!
//! An [`AclKeyFragment`] is a bare acl key, used where an endpoint only
//! needs to address a securable object.

use lattice_core::{fields, AclKey, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::principal::Principal;
use crate::types::{ActionType, PermissionType};

// ─── Ace ─────────────────────────────────────────────────────────────

/// An access-control entry: permissions granted to one principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Ace {
    principal: Principal,
    permissions: UniqueSet<PermissionType>,
}

impl Ace {
    /// The grantee.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The granted permissions.
    pub fn permissions(&self) -> &UniqueSet<PermissionType> {
        &self.permissions
    }
}

/// Builder for [`Ace`].
#[derive(Debug, Clone, Default)]
pub struct AceBuilder {
    principal: Option<Principal>,
    permissions: Option<UniqueSet<PermissionType>>,
}

impl AceBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grantee.
    pub fn set_principal(mut self, principal: Principal) -> Result<Self, ValidationError> {
        self.principal = Some(principal);
        Ok(self)
    }

    /// Set the granted permissions. Duplicates are dropped.
    pub fn set_permissions<I>(mut self, permissions: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.permissions = Some(fields::member_set("permissions", permissions)?);
        Ok(self)
    }
}

impl From<&Ace> for AceBuilder {
    fn from(ace: &Ace) -> Self {
        Self {
            principal: Some(ace.principal.clone()),
            permissions: Some(ace.permissions.clone()),
        }
    }
}

impl ModelBuilder for AceBuilder {
    type Model = Ace;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Ace::NAME, value)?;
        let mut builder = Self::new();
        if let Some(principal) = obj.object("principal")? {
            builder = builder.set_principal(nested!(Principal, "principal", principal)?)?;
        }
        if let Some(permissions) = obj.str_array("permissions")? {
            builder = builder.set_permissions(permissions)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Ace, ValidationError> {
        Ok(Ace {
            principal: self.principal.clone().ok_or(ValidationError::missing("principal"))?,
            permissions: self.permissions.clone().unwrap_or_default(),
        })
    }
}

model_contract!(Ace, AceBuilder, is_valid_ace);

// ─── Acl ─────────────────────────────────────────────────────────────

/// The access-control entries attached to one securable object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    acl_key: AclKey,
    aces: Vec<Ace>,
}

impl Acl {
    /// The securable object's key.
    pub fn acl_key(&self) -> &AclKey {
        &self.acl_key
    }

    /// The entries, in the order given.
    pub fn aces(&self) -> &[Ace] {
        &self.aces
    }
}

/// Builder for [`Acl`].
#[derive(Debug, Clone, Default)]
pub struct AclBuilder {
    acl_key: Option<AclKey>,
    aces: Option<Vec<Ace>>,
}

impl AclBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acl key. Order is significant and duplicates are kept.
    pub fn set_acl_key<I>(mut self, acl_key: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.acl_key = Some(AclKey::parse("aclKey", acl_key)?);
        Ok(self)
    }

    /// Set the entries. Repeated entries are dropped, first occurrence kept.
    pub fn set_aces(mut self, aces: impl IntoIterator<Item = Ace>) -> Result<Self, ValidationError> {
        self.aces = Some(fields::dedup_list(aces));
        Ok(self)
    }
}

impl From<&Acl> for AclBuilder {
    fn from(acl: &Acl) -> Self {
        Self {
            acl_key: Some(acl.acl_key.clone()),
            aces: Some(acl.aces.clone()),
        }
    }
}

impl ModelBuilder for AclBuilder {
    type Model = Acl;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(Acl::NAME, value)?;
        let mut builder = Self::new();
        if let Some(acl_key) = obj.str_array("aclKey")? {
            builder = builder.set_acl_key(acl_key)?;
        }
        if let Some(aces) = obj.array("aces")? {
            builder = builder.set_aces(fields::each(aces, |ace| nested!(Ace, "aces", ace))?)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<Acl, ValidationError> {
        Ok(Acl {
            acl_key: self.acl_key.clone().ok_or(ValidationError::missing("aclKey"))?,
            aces: self.aces.clone().unwrap_or_default(),
        })
    }
}

model_contract!(Acl, AclBuilder, is_valid_acl);

// ─── AclData ─────────────────────────────────────────────────────────

/// An acl update: the acl plus how to apply it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AclData {
    acl: Acl,
    action: ActionType,
}

impl AclData {
    /// The acl to apply.
    pub fn acl(&self) -> &Acl {
        &self.acl
    }

    /// How to apply it.
    pub fn action(&self) -> ActionType {
        self.action
    }
}

/// Builder for [`AclData`].
#[derive(Debug, Clone, Default)]
pub struct AclDataBuilder {
    acl: Option<Acl>,
    action: Option<ActionType>,
}

impl AclDataBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acl.
    pub fn set_acl(mut self, acl: Acl) -> Result<Self, ValidationError> {
        self.acl = Some(acl);
        Ok(self)
    }

    /// Set the action (`ADD`, `REMOVE`, `REQUEST`, `SET`).
    pub fn set_action(mut self, action: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.action = Some(fields::member("action", action)?);
        Ok(self)
    }
}

impl From<&AclData> for AclDataBuilder {
    fn from(data: &AclData) -> Self {
        Self {
            acl: Some(data.acl.clone()),
            action: Some(data.action),
        }
    }
}

impl ModelBuilder for AclDataBuilder {
    type Model = AclData;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(AclData::NAME, value)?;
        let mut builder = Self::new();
        if let Some(acl) = obj.object("acl")? {
            builder = builder.set_acl(nested!(Acl, "acl", acl)?)?;
        }
        if let Some(action) = obj.str("action")? {
            builder = builder.set_action(action)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<AclData, ValidationError> {
        Ok(AclData {
            acl: self.acl.clone().ok_or(ValidationError::missing("acl"))?,
            action: self.action.ok_or(ValidationError::missing("action"))?,
        })
    }
}

model_contract!(AclData, AclDataBuilder, is_valid_acl_data);

// ─── AclKeyFragment ──────────────────────────────────────────────────

/// A bare acl key addressing one securable object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AclKeyFragment {
    acl_key: AclKey,
}

impl AclKeyFragment {
    /// The key.
    pub fn acl_key(&self) -> &AclKey {
        &self.acl_key
    }
}

/// Builder for [`AclKeyFragment`].
#[derive(Debug, Clone, Default)]
pub struct AclKeyFragmentBuilder {
    acl_key: Option<AclKey>,
}

impl AclKeyFragmentBuilder {
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
}

impl From<&AclKeyFragment> for AclKeyFragmentBuilder {
    fn from(fragment: &AclKeyFragment) -> Self {
        Self {
            acl_key: Some(fragment.acl_key.clone()),
        }
    }
}

impl ModelBuilder for AclKeyFragmentBuilder {
    type Model = AclKeyFragment;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(AclKeyFragment::NAME, value)?;
        let mut builder = Self::new();
        if let Some(acl_key) = obj.str_array("aclKey")? {
            builder = builder.set_acl_key(acl_key)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<AclKeyFragment, ValidationError> {
        Ok(AclKeyFragment {
            acl_key: self.acl_key.clone().ok_or(ValidationError::missing("aclKey"))?,
        })
    }
}

model_contract!(AclKeyFragment, AclKeyFragmentBuilder, is_valid_acl_key_fragment);
