//! # lattice-models: Entity Data Model and Authorization Value Objects
//!
//! Every payload the Lattice SDK sends to or reads from the server, as an
//! immutable value object paired with a validating builder. All of them
//! follow the contract in [`lattice_core::model`]:
//!
//! ```
//! use lattice_core::{Model, ModelBuilder};
//! use lattice_models::{is_valid_entity_type, EntityTypeBuilder};
//!
//! let entity_type = EntityTypeBuilder::new()
//!     .set_type(("LATTICE", "MyEntity"))?
//!     .set_title("title")?
//!     .build()?;
//! assert!(is_valid_entity_type(&entity_type));
//! assert_eq!(entity_type.to_wire_object().unwrap()["key"], serde_json::json!([]));
//! # Ok::<(), lattice_core::ValidationError>(())
//! ```
//!
//! ## Modules
//!
//! - EDM schema: [`entity_type`], [`property_type`], [`association_type`],
//!   [`entity_set`], [`schema`], [`linking`].
//! - Authorization: [`principal`], [`acl`], [`access`], [`request`].
//! - Organizations and apps: [`organization`], [`app`], [`data_source`].
//! - Entity data: [`data`].
//! - Enum tables: [`types`].

#[macro_use]
mod macros;

pub mod access;
pub mod acl;
pub mod app;
pub mod association_type;
pub mod data;
pub mod data_source;
pub mod entity_set;
pub mod entity_type;
pub mod linking;
pub mod organization;
pub mod principal;
pub mod property_type;
pub mod request;
pub mod schema;
pub mod types;

pub use access::{is_valid_access_check, AccessCheck, AccessCheckBuilder};
pub use acl::{
    is_valid_ace, is_valid_acl, is_valid_acl_data, is_valid_acl_key_fragment, Ace, AceBuilder, Acl,
    AclBuilder, AclData, AclDataBuilder, AclKeyFragment, AclKeyFragmentBuilder,
};
pub use app::{is_valid_app, is_valid_app_type, App, AppBuilder, AppType, AppTypeBuilder};
pub use association_type::{is_valid_association_type, AssociationType, AssociationTypeBuilder};
pub use data::{
    is_valid_data_association, is_valid_data_edge_key, is_valid_data_graph,
    is_valid_entity_data_key, DataAssociation, DataAssociationBuilder, DataEdgeKey,
    DataEdgeKeyBuilder, DataGraph, DataGraphBuilder, EntityData, EntityDataKey,
    EntityDataKeyBuilder,
};
pub use data_source::{is_valid_data_source, DataSource, DataSourceBuilder};
pub use entity_set::{is_valid_entity_set, EntitySet, EntitySetBuilder};
pub use entity_type::{is_valid_entity_type, EntityType, EntityTypeBuilder, PropertyTags};
pub use linking::{
    is_valid_linking_entity_set, is_valid_linking_entity_type, is_valid_linking_request,
    LinkingEntitySet, LinkingEntitySetBuilder, LinkingEntityType, LinkingEntityTypeBuilder,
    LinkingProperties, LinkingRequest, LinkingRequestBuilder,
};
pub use organization::{
    is_valid_organization, is_valid_role, Organization, OrganizationBuilder, Role, RoleBuilder,
};
pub use principal::{is_valid_principal, Principal, PrincipalBuilder};
pub use property_type::{is_valid_property_type, PropertyType, PropertyTypeBuilder};
pub use request::{
    is_valid_request, is_valid_request_status, Request, RequestBuilder, RequestStatus,
    RequestStatusBuilder,
};
pub use schema::{is_valid_schema, Schema, SchemaBuilder};
pub use types::{
    ActionType, AnalyzerType, EdmPrimitiveType, EntitySetFlagType, IndexType, PermissionType,
    PrincipalType, RequestStateType, SecurableType,
};
