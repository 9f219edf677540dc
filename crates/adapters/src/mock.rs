//! Offline mock adapter
//!
//! Stands in for the live store when none is reachable (local development,
//! demos). It is a stub, not a simulator:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `get` | empty list |
//! | `retrieve` | `None` |
//! | `create` / `update` | fresh identity merged with the input fields |
//! | `delete` | success, no effect |
//!
//! Every call sleeps for the configured delay first so loading indicators
//! and disabled states behave as they do against the live store.
//!
//! Identities are UUID v4 strings, unique within the process. Fields are
//! merged in their JSON form without relationship encoding; reference
//! fields keep their descriptor list. The generated identity is written
//! last and wins over an input field of the same name.

use crate::adapter::{AdapterKind, RecordAdapter};
use async_trait::async_trait;
use recordgate_core::{FieldSet, Query, Record, Result};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default artificial latency
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(500);

/// Default name of the identity field on synthetic records
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

/// In-process stand-in for the live store
#[derive(Debug, Clone)]
pub struct MockAdapter {
    delay: Duration,
    identity_field: String,
}

impl MockAdapter {
    /// Create a mock with the default delay and identity field
    pub fn new() -> Self {
        MockAdapter {
            delay: DEFAULT_MOCK_DELAY,
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
        }
    }

    /// Override the artificial latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the identity field written on synthetic records
    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = field.into();
        self
    }

    /// Configured latency
    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn pause(&self, operation: &'static str, collection: &str) {
        debug!(
            target: "recordgate::mock",
            operation,
            collection,
            delay_ms = self.delay.as_millis() as u64,
            "Serving call from mock adapter"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn synthesize(&self, fields: &FieldSet) -> Result<Record> {
        let mut record = Record::new();
        for field in fields.iter() {
            if !field.value.is_null() {
                record.insert(field.name.clone(), field.value.to_json()?);
            }
        }
        record.insert(
            self.identity_field.clone(),
            JsonValue::String(Uuid::new_v4().to_string()),
        );
        Ok(record)
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordAdapter for MockAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Mock
    }

    async fn get(&self, collection: &str, _query: &Query) -> Result<Vec<Record>> {
        self.pause("get", collection).await;
        Ok(Vec::new())
    }

    async fn retrieve(
        &self,
        collection: &str,
        _id: &str,
        _query: &Query,
    ) -> Result<Option<Record>> {
        self.pause("retrieve", collection).await;
        Ok(None)
    }

    async fn create(&self, collection: &str, fields: &FieldSet) -> Result<Record> {
        self.pause("create", collection).await;
        self.synthesize(fields)
    }

    async fn update(
        &self,
        collection: &str,
        _id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Record>> {
        self.pause("update", collection).await;
        self.synthesize(fields).map(Some)
    }

    async fn delete(&self, collection: &str, _id: &str) -> Result<()> {
        self.pause("delete", collection).await;
        Ok(())
    }

    async fn identity_alias(&self, _collection: &str) -> Result<Option<String>> {
        Ok(None)
    }
}
