//! Integration test: wire objects of the concrete models.
//!
//! Each fixture is a payload in the exact shape the server sends and
//! accepts. A fixture must build, project back to itself, and survive a
//! builder round trip unchanged.

use std::collections::{BTreeMap, HashMap};

use lattice_core::{Model, ModelBuilder};
use lattice_models::*;
use serde_json::{json, Value};

const ORG: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";
const ES: &str = "0c8be4b7-0bd5-4dd1-a623-da78871c9d0e";
const ET: &str = "4b07c4c8-9b8e-4d8a-b5a3-0e2c3d1f6a11";
const PT_1: &str = "00000000-0000-0000-0000-000000000001";
const PT_2: &str = "00000000-0000-0000-0000-000000000002";
const APP_TYPE_A: &str = "00000000-0000-0000-0000-00000000000a";
const APP_TYPE_B: &str = "00000000-0000-0000-0000-00000000000b";

/// Route rejection logs to the test harness output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lattice_core=debug")
        .with_test_writer()
        .try_init();
}

/// Build `fixture` as `M`, check it projects back to `fixture`, and that the
/// builder round trip is stable.
fn assert_fixture<M: Model + std::fmt::Debug>(fixture: Value) -> M {
    let model = M::try_from_value(&fixture)
        .unwrap_or_else(|e| panic!("{} fixture rejected: {e}", M::NAME));
    assert_eq!(model.to_wire_object().unwrap(), fixture, "{} projection", M::NAME);
    let first = model.to_builder().build().unwrap();
    let second = first.to_builder().build().unwrap();
    assert_eq!(first, model);
    assert_eq!(second, first);
    model
}

#[test]
fn test_entity_type_minimal_scenario() {
    let entity_type = EntityTypeBuilder::new()
        .set_type(json!({"namespace": "LATTICE", "name": "MyEntity"}))
        .unwrap()
        .set_title("title")
        .unwrap()
        .build()
        .unwrap();
    let wire = entity_type.to_wire_object().unwrap();
    assert_eq!(
        wire,
        json!({
            "type": {"namespace": "LATTICE", "name": "MyEntity"},
            "title": "title",
            "key": [],
            "properties": [],
            "schemas": [],
            "propertyTags": {}
        })
    );
    for absent in ["id", "description", "baseType", "category"] {
        assert!(wire.get(absent).is_none(), "{absent} must be omitted");
    }
}

#[test]
fn test_access_check_scenario() {
    init_tracing();
    let err = AccessCheckBuilder::new().set_acl_key(["not-a-uuid"]).unwrap_err();
    assert!(err.to_string().starts_with("invalid parameter: aclKey"));
    assert!(!is_valid_access_check(&json!({
        "aclKey": ["not-a-uuid"],
        "permissions": ["READ"]
    })));
}

#[test]
fn test_app_type_ids_dedup_to_first_occurrence() {
    let app = AppBuilder::new()
        .set_name("chronicle")
        .unwrap()
        .set_title("Chronicle")
        .unwrap()
        .set_url("https://openlattice.com/chronicle")
        .unwrap()
        .set_app_type_ids([APP_TYPE_A, APP_TYPE_A, APP_TYPE_B])
        .unwrap()
        .build()
        .unwrap();
    let ids: Vec<String> = app.app_type_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec![APP_TYPE_A, APP_TYPE_B]);
}

#[test]
fn test_acl_key_keeps_duplicates_and_order() {
    let fragment = AclKeyFragmentBuilder::new()
        .set_acl_key([ES, PT_1, ES])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(fragment.acl_key().len(), 3);
    let reordered = AclKeyFragmentBuilder::new()
        .set_acl_key([PT_1, ES, ES])
        .unwrap()
        .build()
        .unwrap();
    assert_ne!(fragment, reordered);
    assert_ne!(fragment.canonical_key().unwrap(), reordered.canonical_key().unwrap());
}

#[test]
fn test_authorization_fixtures() {
    assert_fixture::<AclData>(json!({
        "acl": {
            "aclKey": [ES, PT_1],
            "aces": [
                {"principal": {"type": "ROLE", "id": "admins"}, "permissions": ["OWNER", "READ"]},
                {"principal": {"type": "USER", "id": "auth0|123"}, "permissions": ["READ"]}
            ]
        },
        "action": "ADD"
    }));
    assert_fixture::<RequestStatus>(json!({
        "request": {"aclKey": [ES], "permissions": ["READ"], "reason": "audit"},
        "status": "APPROVED",
        "principal": {"type": "USER", "id": "auth0|123"}
    }));
}

#[test]
fn test_edm_fixtures() {
    assert_fixture::<PropertyType>(json!({
        "type": {"namespace": "general", "name": "fullname"},
        "title": "Full Name",
        "datatype": "String",
        "schemas": [],
        "pii": true,
        "analyzer": "METAPHONE",
        "enumValues": []
    }));
    assert_fixture::<EntitySet>(json!({
        "id": ES,
        "entityTypeId": ET,
        "name": "people",
        "title": "People",
        "contacts": ["ops@openlattice.com"],
        "organizationId": ORG,
        "flags": ["AUDIT"]
    }));
    assert_fixture::<AssociationType>(json!({
        "entityType": {
            "type": {"namespace": "general", "name": "knows"},
            "title": "Knows",
            "key": [PT_1],
            "properties": [PT_1, PT_2],
            "schemas": [],
            "category": "AssociationType",
            "propertyTags": {}
        },
        "src": [ET],
        "dst": [ET],
        "bidirectional": true
    }));
}

#[test]
fn test_organization_fixture() {
    let org: Organization = assert_fixture(json!({
        "id": ORG,
        "title": "OpenLattice",
        "principal": {"type": "ORGANIZATION", "id": "openlattice"},
        "members": [{"type": "USER", "id": "auth0|123"}],
        "roles": [{"organizationId": ORG, "title": "admin"}],
        "emails": ["openlattice.com"],
        "apps": [APP_TYPE_A]
    }));
    assert_eq!(org.roles()[0].organization_id().to_string(), ORG);
}

#[test]
fn test_data_fixtures() {
    assert_fixture::<DataGraph>(json!({
        "entities": {
            ES: [{PT_1: ["Ada Lovelace"], PT_2: [1815]}]
        },
        "associations": {
            ET: [{
                "srcEntitySetId": ES,
                "srcEntityIndex": 0,
                "dstEntitySetId": ES,
                "dstEntityIndex": 0,
                "data": {PT_1: [true]}
            }]
        }
    }));
    assert_fixture::<DataEdgeKey>(json!({
        "src": {"entitySetId": ES, "entityKeyId": ORG},
        "dst": {"entitySetId": ES, "entityKeyId": ET},
        "edge": {"entitySetId": ET, "entityKeyId": ORG}
    }));
}

#[test]
fn test_candidate_shapes_are_equivalent() {
    init_tracing();
    let wire = json!({
        "aclKey": [ES],
        "permissions": ["WRITE", "READ"],
        "reason": "migration"
    });
    let instance = Request::try_from_value(&wire).unwrap();
    let btree: BTreeMap<String, Value> = serde_json::from_value(wire.clone()).unwrap();
    let hash: HashMap<String, Value> = serde_json::from_value(wire.clone()).unwrap();
    let map = wire.as_object().unwrap().clone();

    assert!(is_valid_request(&instance));
    assert!(is_valid_request(&wire));
    assert!(is_valid_request(&btree));
    assert!(is_valid_request(&hash));
    assert!(is_valid_request(&map));

    let from_instance = RequestBuilder::from(&instance).build().unwrap();
    let from_btree = Request::try_from_value(&serde_json::to_value(&btree).unwrap()).unwrap();
    let from_hash = Request::try_from_value(&serde_json::to_value(&hash).unwrap()).unwrap();
    assert_eq!(from_instance, instance);
    assert_eq!(from_btree, instance);
    assert_eq!(from_hash, instance);
}

#[test]
fn test_validating_deserialize() {
    let ok: Schema = serde_json::from_value(json!({"fqn": "general.people"})).unwrap();
    assert_eq!(ok.fqn().to_string(), "general.people");
    assert!(serde_json::from_value::<Schema>(json!({"fqn": "people"})).is_err());
    assert!(serde_json::from_value::<Principal>(json!({"type": "GROUP", "id": "x"})).is_err());
}

#[test]
fn test_equal_models_share_digest() {
    let a = DataSourceBuilder::new()
        .set_title("CAD")
        .unwrap()
        .set_entity_set_ids([ES, ET])
        .unwrap()
        .build()
        .unwrap();
    let b = DataSourceBuilder::new()
        .set_title("CAD")
        .unwrap()
        .set_entity_set_ids([ET, ES, ET])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn test_type_name_with_dot_is_rejected() {
    let dotted = EntityTypeBuilder::new().set_type(("a", "b.c")).unwrap_err();
    assert_eq!(dotted.field(), Some("type"));
    let split = EntityTypeBuilder::new()
        .set_type(("a.b", "c"))
        .unwrap()
        .set_title("t")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        split.to_wire_object().unwrap()["type"],
        json!({"namespace": "a.b", "name": "c"})
    );
    assert!(!is_valid_entity_type(&json!({
        "type": {"namespace": "a", "name": "b.c"},
        "title": "t"
    })));
}

#[test]
fn test_uuid_keys_differing_in_case_are_rejected() {
    init_tracing();
    let upper = ORG.to_uppercase();
    let tags = json!({
        "type": {"namespace": "general", "name": "person"},
        "title": "Person",
        "propertyTags": {ORG: ["lower"], upper: ["upper"]}
    });
    assert!(!is_valid_entity_type(&tags));
    let err = EntityType::try_from_value(&tags).unwrap_err();
    assert_eq!(err.field(), Some("propertyTags"));
}
