//! Backend Selection Tests
//!
//! The probe is asked on every call; the answer at call time decides the
//! adapter, and a live failure is never retried against the mock.

use crate::common::*;
use recordgate::{
    AccessConfig, AdapterKind, FieldSet, MetadataCache, RecordAccess, RecordRef, SwitchableProbe,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn backend_can_appear_and_disappear_between_calls() {
    let probe = Arc::new(SwitchableProbe::new());
    let config = AccessConfig {
        mock_delay_ms: 0,
        ..AccessConfig::default()
    };
    let access = RecordAccess::with_config(probe.clone(), &config);
    let fields = FieldSet::new().scalar("title", "x");

    access.create("widgets", &fields).await.unwrap();

    let store = org_store();
    probe.connect(store.clone());
    access.create("widgets", &fields).await.unwrap();
    assert_eq!(store.records("widgets").len(), 1);

    probe.disconnect();
    assert_eq!(access.adapter().kind(), AdapterKind::Mock);
    access.create("widgets", &fields).await.unwrap();
    assert_eq!(store.records("widgets").len(), 1);
}

#[tokio::test]
async fn unreachable_live_store_fails_instead_of_falling_back() {
    let store = org_store();
    store.set_unreachable(true);
    let access = live_access(&store);

    let err = access.get("widgets", None, None, None).await.unwrap_err();

    assert!(err.is_remote_failure());
    assert_eq!(access.adapter().kind(), AdapterKind::Live);
}

#[tokio::test]
async fn shared_cache_is_scoped_per_store() {
    let cache = Arc::new(MetadataCache::new());
    let probe = Arc::new(SwitchableProbe::new());
    let access = RecordAccess::new(probe.clone()).with_metadata_cache(cache.clone());
    let fields = FieldSet::new().lookup("owner", RecordRef::new("users", "u1"));

    let first = org_store();
    probe.connect(first.clone());
    access.create("widgets", &fields).await.unwrap();
    access.create("widgets", &fields).await.unwrap();
    assert_eq!(first.metadata_calls(), 1);

    let second = Arc::new(
        recordgate::testing::InMemoryEntityStore::new("other-org")
            .with_entity_set("users", "users_v2"),
    );
    probe.connect(second.clone());
    access.create("widgets", &fields).await.unwrap();

    assert_eq!(second.metadata_calls(), 1);
    assert_eq!(
        second.last_payload().unwrap().to_json(),
        json!({"owner@bind": "/users_v2(u1)"})
    );
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn copy_record_between_collections() {
    let store = org_store();
    store.seed(
        "workorders",
        json!({"id": "w1", "title": "pump", "site": [{"id": "s1", "entityType": "sites"}]}),
    );
    let access = live_access(&store);

    let overrides = FieldSet::new().scalar("title", "pump (template)");

    access
        .copy_record("workorders", "w1", "workordertemplates", &overrides)
        .await
        .unwrap();

    assert_eq!(store.records("workordertemplates").len(), 1);
    assert_eq!(
        store.last_payload().unwrap().to_json(),
        json!({"title": "pump (template)", "site@bind": "/sites(s1)"})
    );
}

#[tokio::test]
async fn copy_record_keeps_lookups_read_from_the_web_api() {
    let store = org_store();
    store.seed(
        "workorders",
        json!({
            "@odata.etag": "W/\"7\"",
            "id": "w1",
            "workorderid": "w1",
            "title": "pump",
            "_ownerid_value": "u1",
            "_ownerid_value@Microsoft.Dynamics.CRM.lookuplogicalname": "systemuser",
            "_siteid_value": null
        }),
    );
    let access = live_access(&store);

    access
        .copy_record("workorders", "{w1}", "workorders", &FieldSet::new())
        .await
        .unwrap();

    assert_eq!(
        store.last_payload().unwrap().to_json(),
        json!({"title": "pump", "ownerid@bind": "/systemusers(u1)"})
    );
}
