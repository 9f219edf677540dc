//! Bulk Fan-Out Tests

use crate::common::*;
use recordgate::{FieldSet, Target};
use serde_json::json;

#[tokio::test]
async fn one_failing_target_does_not_affect_siblings() {
    init_tracing();
    let store = org_store();
    for id in ["a", "b", "c"] {
        store.seed("timesheets", json!({"id": id, "approved": false}));
    }
    store.fail_id("b");
    let access = live_access(&store);
    let targets = vec![
        Target::new("timesheets", "a"),
        Target::new("timesheets", "{b}"),
        Target::new("timesheets", "c"),
    ];

    let outcome = access
        .apply_to_many(&targets, &FieldSet::new().scalar("approved", true))
        .await;

    assert_eq!(outcome.len(), 3);
    assert!(!outcome.all_succeeded());
    let failed: Vec<_> = outcome.failed().map(|o| o.target.id.as_str()).collect();
    assert_eq!(failed, ["{b}"]);

    let approved: Vec<_> = store
        .records("timesheets")
        .into_iter()
        .filter(|r| r["approved"] == json!(true))
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(approved, [json!("a"), json!("c")]);
}

#[tokio::test]
async fn bulk_reference_fields_resolve_per_target() {
    let store = org_store();
    for id in ["a", "b"] {
        store.seed("workorders", json!({"id": id}));
    }
    let access = live_access(&store);
    let fields = FieldSet::new().lookup("owner", recordgate::RecordRef::new("users", "{u1}"));

    let outcome = access
        .apply_to_many(
            &[Target::new("workorders", "a"), Target::new("workorders", "b")],
            &fields,
        )
        .await;

    assert!(outcome.all_succeeded());
    assert_eq!(store.metadata_calls(), 2);
    assert_eq!(
        store.last_payload().unwrap().to_json(),
        json!({"owner@bind": "/systemusers(u1)"})
    );
}

#[tokio::test(start_paused = true)]
async fn offline_bulk_settles_every_target() {
    let access = offline_access();
    let targets: Vec<Target> = (0..10).map(|i| Target::new("widgets", i.to_string())).collect();

    let outcome = access
        .apply_to_many(&targets, &FieldSet::new().scalar("status", 2))
        .await;

    assert_eq!(outcome.succeeded().count(), 10);
}
