//! Integration test: required fields of every concrete model.
//!
//! Each case is a complete payload and the wire keys the model requires.
//! The complete payload must build; dropping any one required key must
//! fail with `MissingProperty` naming that key.

use lattice_core::{Model, ValidationError};
use lattice_models::*;
use serde_json::{json, Value};

const ORG: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";
const ES: &str = "0c8be4b7-0bd5-4dd1-a623-da78871c9d0e";
const ET: &str = "4b07c4c8-9b8e-4d8a-b5a3-0e2c3d1f6a11";
const PT_1: &str = "00000000-0000-0000-0000-000000000001";
const PT_2: &str = "00000000-0000-0000-0000-000000000002";
const KEY: &str = "00000000-0000-0000-0000-0000000000bb";

fn assert_required<M: Model + std::fmt::Debug>(complete: Value, required: &[&'static str]) {
    if let Err(e) = M::try_from_value(&complete) {
        panic!("complete {} payload rejected: {e}", M::NAME);
    }
    for &key in required {
        let mut partial = complete.clone();
        let removed = partial.as_object_mut().and_then(|map| map.remove(key));
        assert!(removed.is_some(), "{} payload has no {key}", M::NAME);
        assert_eq!(
            M::try_from_value(&partial).unwrap_err(),
            ValidationError::MissingProperty(key),
            "{} without {key}",
            M::NAME
        );
    }
}

fn principal() -> Value {
    json!({"type": "USER", "id": "auth0|123"})
}

fn entity_type() -> Value {
    json!({
        "id": ET,
        "type": {"namespace": "general", "name": "person"},
        "title": "Person",
        "description": "A human being",
        "key": [PT_1],
        "properties": [PT_1, PT_2],
        "schemas": ["general.people"],
        "baseType": PT_2,
        "category": "EntityType",
        "propertyTags": {PT_1: ["name"]}
    })
}

fn entity_set() -> Value {
    json!({
        "id": ES,
        "entityTypeId": ET,
        "name": "people",
        "title": "People",
        "description": "Everyone",
        "contacts": ["ops@openlattice.com"],
        "organizationId": ORG,
        "flags": ["LINKING"]
    })
}

fn entity_data_key(entity_set_id: &str) -> Value {
    json!({"entitySetId": entity_set_id, "entityKeyId": KEY})
}

#[test]
fn test_authorization_required_fields() {
    assert_required::<Principal>(principal(), &["type", "id"]);
    assert_required::<Ace>(
        json!({"principal": principal(), "permissions": ["READ"]}),
        &["principal"],
    );
    let acl = json!({
        "aclKey": [ES],
        "aces": [{"principal": principal(), "permissions": ["READ"]}]
    });
    assert_required::<Acl>(acl.clone(), &["aclKey"]);
    assert_required::<AclData>(json!({"acl": acl, "action": "SET"}), &["acl", "action"]);
    assert_required::<AccessCheck>(
        json!({"aclKey": [ES, PT_1], "permissions": ["READ"]}),
        &["aclKey", "permissions"],
    );
    assert_required::<AclKeyFragment>(json!({"aclKey": [ES]}), &["aclKey"]);
    let request = json!({"aclKey": [ES], "permissions": ["WRITE"], "reason": "audit"});
    assert_required::<Request>(request.clone(), &["aclKey", "permissions"]);
    assert_required::<RequestStatus>(
        json!({"request": request, "status": "SUBMITTED", "principal": principal()}),
        &["request", "status", "principal"],
    );
}

#[test]
fn test_organization_required_fields() {
    assert_required::<Role>(
        json!({
            "id": PT_1,
            "organizationId": ORG,
            "title": "admin",
            "description": "Administrators",
            "principal": {"type": "ROLE", "id": "admins"}
        }),
        &["organizationId", "title"],
    );
    assert_required::<Organization>(
        json!({
            "id": ORG,
            "title": "OpenLattice",
            "description": "Data",
            "principal": {"type": "ORGANIZATION", "id": "openlattice"},
            "members": [principal()],
            "roles": [{"organizationId": ORG, "title": "admin"}],
            "emails": ["openlattice.com"],
            "apps": [PT_1]
        }),
        &["title"],
    );
    assert_required::<App>(
        json!({
            "id": PT_1,
            "name": "chronicle",
            "title": "Chronicle",
            "description": "Activity",
            "url": "https://openlattice.com/chronicle",
            "appTypeIds": [PT_2]
        }),
        &["name", "title", "url"],
    );
    assert_required::<AppType>(
        json!({
            "id": PT_2,
            "type": {"namespace": "chronicle", "name": "device"},
            "title": "Device",
            "description": "A phone",
            "entityTypeId": ET
        }),
        &["type", "title", "entityTypeId"],
    );
}

#[test]
fn test_edm_required_fields() {
    assert_required::<EntityType>(entity_type(), &["type", "title"]);
    assert_required::<PropertyType>(
        json!({
            "id": PT_1,
            "type": {"namespace": "general", "name": "fullname"},
            "title": "Full Name",
            "description": "First and last",
            "datatype": "String",
            "schemas": ["general.people"],
            "pii": true,
            "multiValued": false,
            "analyzer": "STANDARD",
            "indexType": "BTREE",
            "enumValues": ["a"]
        }),
        &["type", "title", "datatype"],
    );
    assert_required::<AssociationType>(
        json!({"entityType": entity_type(), "src": [ET], "dst": [ET], "bidirectional": true}),
        &["entityType"],
    );
    assert_required::<EntitySet>(entity_set(), &["entityTypeId", "name", "title"]);
    assert_required::<Schema>(
        json!({
            "fqn": {"namespace": "general", "name": "people"},
            "entityTypes": [entity_type()],
            "propertyTypes": []
        }),
        &["fqn"],
    );
    assert_required::<DataSource>(
        json!({"id": PT_1, "title": "CAD", "description": "Dispatch", "entitySetIds": [ES]}),
        &["title"],
    );
}

#[test]
fn test_linking_required_fields() {
    let linking_entity_set = json!({
        "entitySet": entity_set(),
        "linkingProperties": [{PT_1: PT_2}]
    });
    assert_required::<LinkingEntitySet>(linking_entity_set.clone(), &["entitySet"]);
    assert_required::<LinkingEntityType>(
        json!({"entityType": entity_type(), "entityTypeIds": [ET], "deidentified": true}),
        &["entityType", "entityTypeIds"],
    );
    assert_required::<LinkingRequest>(
        json!({"linkingEntitySet": linking_entity_set, "resultPropertyTypeIds": [PT_1]}),
        &["linkingEntitySet"],
    );
}

#[test]
fn test_data_required_fields() {
    assert_required::<EntityDataKey>(entity_data_key(ES), &["entitySetId", "entityKeyId"]);
    assert_required::<DataEdgeKey>(
        json!({
            "src": entity_data_key(ES),
            "dst": entity_data_key(ET),
            "edge": entity_data_key(ORG)
        }),
        &["src", "dst", "edge"],
    );
    assert_required::<DataAssociation>(
        json!({
            "srcEntitySetId": ES,
            "srcEntityIndex": 0,
            "dstEntitySetId": ET,
            "dstEntityKeyId": KEY,
            "data": {PT_1: ["since 2019"]}
        }),
        &["srcEntitySetId", "dstEntitySetId"],
    );
    // every DataGraph field defaults
    assert_required::<DataGraph>(json!({}), &[]);
}
