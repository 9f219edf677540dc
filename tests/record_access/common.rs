//! Common test utilities for record access tests

use recordgate::testing::InMemoryEntityStore;
use recordgate::{AccessConfig, RecordAccess, StaticProbe};
use std::sync::Arc;

/// Store that resolves `users` to `systemusers` and knows the primary keys
/// of the collections the suite writes to
pub fn org_store() -> Arc<InMemoryEntityStore> {
    Arc::new(
        InMemoryEntityStore::new("org")
            .with_entity_set("users", "systemusers")
            .with_entity_set("systemuser", "systemusers")
            .with_entity_set("sites", "sites")
            .with_primary_id("widgets", "widgetid")
            .with_primary_id("workorders", "workorderid")
            .with_primary_id("timesheets", "timesheetid")
            .with_primary_id("accounts", "accountid"),
    )
}

/// Façade over `store`
pub fn live_access(store: &Arc<InMemoryEntityStore>) -> RecordAccess {
    RecordAccess::new(Arc::new(StaticProbe::live(store.clone())))
}

/// Façade with no live store and the default mock delay
#[allow(dead_code)]
pub fn offline_access() -> RecordAccess {
    RecordAccess::new(Arc::new(StaticProbe::offline()))
}

/// Façade with no live store and no mock delay
#[allow(dead_code)]
pub fn instant_offline_access() -> RecordAccess {
    let config = AccessConfig {
        mock_delay_ms: 0,
        ..AccessConfig::default()
    };
    RecordAccess::with_config(Arc::new(StaticProbe::offline()), &config)
}

/// Install a test subscriber once; repeated calls are no-ops
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}
