//! Worked scenarios
//!
//! The three reference flows: an encoded create against a live store, a
//! query built from partial parameters, and a create served offline.

use crate::common::*;
use recordgate::testing::StoreCall;
use recordgate::{FieldSet, Query, RecordRef, DEFAULT_MOCK_DELAY};
use serde_json::json;

// ============================================================================
// Scenario A: reference field becomes a bind path
// ============================================================================

#[tokio::test]
async fn create_encodes_reference_as_bind_path() {
    init_tracing();
    let store = org_store();
    let access = live_access(&store);
    let fields = FieldSet::new()
        .scalar("title", "x")
        .lookup("owner", vec![RecordRef::new("users", "{abc}")]);

    access.create("widgets", &fields).await.unwrap();

    assert_eq!(
        store.last_payload().unwrap().to_json(),
        json!({"title": "x", "owner@bind": "/systemusers(abc)"})
    );
}

#[tokio::test]
async fn create_with_unknown_reference_collection_sends_nothing() {
    let store = org_store();
    let access = live_access(&store);
    let fields = FieldSet::new()
        .scalar("title", "x")
        .lookup("owner", RecordRef::new("ghosts", "1"));

    let err = access.create("widgets", &fields).await.unwrap_err();

    assert!(err.is_metadata_unavailable());
    assert!(!store
        .calls()
        .iter()
        .any(|c| matches!(c, StoreCall::Create { .. })));
}

#[tokio::test]
async fn null_fields_are_omitted() {
    let store = org_store();
    let access = live_access(&store);
    let fields = FieldSet::new()
        .scalar("title", "x")
        .scalar("notes", recordgate::FieldValue::Null)
        .lookup("owner", recordgate::FieldValue::Null);

    access.create("widgets", &fields).await.unwrap();

    assert_eq!(store.last_payload().unwrap().to_json(), json!({"title": "x"}));
}

// ============================================================================
// Scenario B: query string from supplied parameters only
// ============================================================================

#[tokio::test]
async fn get_builds_query_from_supplied_parameters() {
    let store = org_store();
    let access = live_access(&store);

    access
        .get("widgets", Some("status eq 1"), Some(&["title", "status"]), None)
        .await
        .unwrap();

    assert_eq!(
        store.calls(),
        vec![StoreCall::List {
            collection: "widgets".into(),
            query: "$filter=status eq 1&$select=title,status".into()
        }]
    );
}

#[tokio::test]
async fn query_with_top_limits_rows() {
    let store = org_store();
    for i in 0..5 {
        store.seed("widgets", json!({"id": i.to_string()}));
    }
    let access = live_access(&store);

    let rows = access
        .query("widgets", &Query::new().order_by("createdon desc").top(2))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
}

// ============================================================================
// Scenario C: offline create after the mock delay
// ============================================================================

#[tokio::test(start_paused = true)]
async fn offline_create_returns_synthetic_record_after_delay() {
    let access = offline_access();
    let start = tokio::time::Instant::now();

    let record = access
        .create("widgets", &FieldSet::new().scalar("title", "x"))
        .await
        .unwrap();

    assert!(start.elapsed() >= DEFAULT_MOCK_DELAY);
    assert_eq!(record["title"], json!("x"));
    assert!(record["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn offline_creates_get_distinct_identities() {
    let access = instant_offline_access();
    let fields = FieldSet::new().scalar("title", "x").scalar("hours", 1.5);

    let mut a = access.create("widgets", &fields).await.unwrap();
    let mut b = access.create("widgets", &fields).await.unwrap();

    assert_ne!(a.remove("id"), b.remove("id"));
    assert_eq!(a, b);
}
