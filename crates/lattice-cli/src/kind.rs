//! # Model Kinds
//!
//! The `--model` argument: one variant per concrete model, named in
//! kebab-case on the command line (`entity-type`, `access-check`, ...).
//! Each variant dispatches to the generic [`Model`] contract of its type.

use clap::ValueEnum;
use lattice_core::{CanonicalKey, ContentDigest, Model, ValidationError};
use lattice_models::*;
use serde_json::Value;

/// Canonical projection of a valid payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    /// RFC 8785 canonical JSON.
    pub key: CanonicalKey,
    /// SHA-256 of `key`.
    pub digest: ContentDigest,
}

/// Outcome of building a payload as some model.
#[derive(Debug)]
pub enum BuildOutcome<T> {
    /// The payload built.
    Valid(T),
    /// The payload was rejected.
    Invalid(ValidationError),
}

fn canonical<M: Model>(payload: &Value) -> anyhow::Result<BuildOutcome<Canonical>> {
    let model = match M::try_from_value(payload) {
        Ok(model) => model,
        Err(e) => return Ok(BuildOutcome::Invalid(e)),
    };
    let key = model.canonical_key()?;
    let digest = model.digest()?;
    Ok(BuildOutcome::Valid(Canonical { key, digest }))
}

macro_rules! model_kinds {
    ($($variant:ident => $model:ty),+ $(,)?) => {
        /// A concrete model a payload can be built as.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
        pub enum ModelKind {
            $(
                #[doc = concat!("[`", stringify!($model), "`]")]
                $variant,
            )+
        }

        impl ModelKind {
            /// The model's type name.
            pub fn model_name(self) -> &'static str {
                match self {
                    $(Self::$variant => <$model as Model>::NAME,)+
                }
            }

            /// Build `payload` as this model.
            pub fn validate(self, payload: &Value) -> Result<(), ValidationError> {
                match self {
                    $(Self::$variant => <$model as Model>::try_from_value(payload).map(|_| ()),)+
                }
            }

            /// Build `payload` as this model and project it canonically.
            pub fn canonicalize(self, payload: &Value) -> anyhow::Result<BuildOutcome<Canonical>> {
                match self {
                    $(Self::$variant => canonical::<$model>(payload),)+
                }
            }
        }
    };
}

model_kinds! {
    AccessCheck => AccessCheck,
    Ace => Ace,
    Acl => Acl,
    AclData => AclData,
    AclKeyFragment => AclKeyFragment,
    App => App,
    AppType => AppType,
    AssociationType => AssociationType,
    DataAssociation => DataAssociation,
    DataEdgeKey => DataEdgeKey,
    DataGraph => DataGraph,
    DataSource => DataSource,
    EntityDataKey => EntityDataKey,
    EntitySet => EntitySet,
    EntityType => EntityType,
    LinkingEntitySet => LinkingEntitySet,
    LinkingEntityType => LinkingEntityType,
    LinkingRequest => LinkingRequest,
    Organization => Organization,
    Principal => Principal,
    PropertyType => PropertyType,
    Request => Request,
    RequestStatus => RequestStatus,
    Role => Role,
    Schema => Schema,
}
