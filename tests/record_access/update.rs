//! Update Tests
//!
//! The identity field and the collection's identity alias never reach the
//! store; the identity travels in the address only.

use crate::common::*;
use proptest::prelude::*;
use recordgate::testing::StoreCall;
use recordgate::{FieldSet, Operation};
use serde_json::json;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[tokio::test]
async fn update_addresses_record_by_normalized_identity() {
    let store = org_store();
    store.seed("workorders", json!({"id": "abc", "status": 1}));
    let access = live_access(&store);

    let updated = access
        .update("workorders", "{abc}", &FieldSet::new().scalar("status", 2))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated["status"], json!(2));
    assert!(matches!(
        store.calls().last(),
        Some(StoreCall::Update { id, .. }) if id == "abc"
    ));
}

#[tokio::test]
async fn update_of_missing_record_is_wrapped_store_failure() {
    let store = org_store();
    let access = live_access(&store);

    let err = access
        .update("workorders", "nope", &FieldSet::new().scalar("status", 2))
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some((Operation::Update, "workorders")));
    assert!(err.is_remote_failure());
}

#[tokio::test]
async fn alias_comes_from_the_stores_primary_key() {
    let store = org_store();
    store.seed("accounts", json!({"id": "abc", "name": "a"}));
    let access = live_access(&store);
    let fields = FieldSet::new()
        .scalar("accountid", "abc")
        .scalar("name", "b");

    access.update("accounts", "abc", &fields).await.unwrap();

    assert_eq!(store.last_payload().unwrap().to_json(), json!({"name": "b"}));
}

#[tokio::test]
async fn offline_update_strips_only_configured_aliases() {
    let mut config = recordgate::AccessConfig {
        mock_delay_ms: 0,
        ..recordgate::AccessConfig::default()
    };
    config
        .identity_aliases
        .insert("accounts".to_string(), "accountid".to_string());
    let access = recordgate::RecordAccess::with_config(
        std::sync::Arc::new(recordgate::StaticProbe::offline()),
        &config,
    );
    let fields = FieldSet::new()
        .scalar("accountid", "abc")
        .scalar("name", "b");

    let record = access
        .update("accounts", "abc", &fields)
        .await
        .unwrap()
        .unwrap();

    assert!(!record.contains_key("accountid"));
    assert_eq!(record["name"], json!("b"));
}

proptest! {
    #[test]
    fn update_never_sends_identity(
        title in "[a-z]{1,12}",
        include_id in any::<bool>(),
        include_alias in any::<bool>(),
    ) {
        let store = org_store();
        store.seed("workorders", json!({"id": "abc"}));
        let access = live_access(&store);

        let mut fields = FieldSet::new().scalar("title", title.clone());
        if include_id {
            fields = fields.scalar("id", "abc");
        }
        if include_alias {
            fields = fields.scalar("workorderid", "abc");
        }

        block_on(access.update("workorders", "abc", &fields)).unwrap();

        let payload = store.last_payload().unwrap();
        prop_assert!(!payload.contains_key("id"));
        prop_assert!(!payload.contains_key("workorderid"));
        prop_assert_eq!(payload.to_json(), json!({"title": title}));
    }
}
