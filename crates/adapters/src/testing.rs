//! In-memory entity store for tests
//!
//! Behaves like a small Web API: records live in per-collection vectors,
//! every primitive is journaled as a [`StoreCall`], and failures can be
//! injected per identity or for the whole store.

use async_trait::async_trait;
use parking_lot::Mutex;
use recordgate_core::{EntityStore, ListPage, Payload, Query, Record, StoreError};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

/// One primitive invoked on an [`InMemoryEntityStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    /// `list` with the rendered query string
    List {
        /// Collection listed
        collection: String,
        /// Query string as sent
        query: String,
    },
    /// `retrieve`
    Retrieve {
        /// Collection addressed
        collection: String,
        /// Identity addressed
        id: String,
    },
    /// `create` with the submitted payload
    Create {
        /// Collection written
        collection: String,
        /// Payload as sent
        payload: Payload,
    },
    /// `update` with the submitted payload
    Update {
        /// Collection written
        collection: String,
        /// Identity addressed
        id: String,
        /// Payload as sent
        payload: Payload,
    },
    /// `delete`
    Delete {
        /// Collection addressed
        collection: String,
        /// Identity addressed
        id: String,
    },
    /// Metadata lookup
    EntitySetName {
        /// Logical name looked up
        logical_name: String,
    },
    /// Primary-key attribute lookup
    PrimaryIdAttribute {
        /// Entity set looked up
        entity_set: String,
    },
}

#[derive(Default)]
struct State {
    records: HashMap<String, Vec<Record>>,
    entity_sets: HashMap<String, String>,
    primary_ids: HashMap<String, String>,
    failing_ids: Vec<String>,
    unreachable: bool,
    calls: Vec<StoreCall>,
}

/// Journaling in-memory [`EntityStore`]
pub struct InMemoryEntityStore {
    name: String,
    identity_field: String,
    state: Mutex<State>,
}

impl InMemoryEntityStore {
    /// Empty store identified as `name`
    pub fn new(name: impl Into<String>) -> Self {
        InMemoryEntityStore {
            name: name.into(),
            identity_field: "id".to_string(),
            state: Mutex::new(State::default()),
        }
    }

    /// Register the entity-set name answered for `logical_name`
    pub fn with_entity_set(self, logical_name: &str, entity_set: &str) -> Self {
        self.state
            .lock()
            .entity_sets
            .insert(logical_name.to_string(), entity_set.to_string());
        self
    }

    /// Register the primary-key attribute answered for `entity_set`
    pub fn with_primary_id(self, entity_set: &str, attribute: &str) -> Self {
        self.state
            .lock()
            .primary_ids
            .insert(entity_set.to_string(), attribute.to_string());
        self
    }

    /// Add a record to `collection`
    ///
    /// # Panics
    ///
    /// Panics if `record` is not a JSON object.
    pub fn seed(&self, collection: &str, record: JsonValue) {
        let JsonValue::Object(record) = record else {
            panic!("seeded record must be an object");
        };
        self.state
            .lock()
            .records
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    /// Make every primitive addressing `id` fail with status 500
    pub fn fail_id(&self, id: &str) {
        self.state.lock().failing_ids.push(id.to_string());
    }

    /// Make every primitive fail with a network error
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unreachable = unreachable;
    }

    /// Journal of primitives invoked so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().calls.clone()
    }

    /// Number of entity-set name lookups served so far
    pub fn metadata_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::EntitySetName { .. }))
            .count()
    }

    /// Payload of the most recent create or update
    pub fn last_payload(&self) -> Option<Payload> {
        self.state.lock().calls.iter().rev().find_map(|c| match c {
            StoreCall::Create { payload, .. } | StoreCall::Update { payload, .. } => {
                Some(payload.clone())
            }
            _ => None,
        })
    }

    /// Records currently held for `collection`
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.state
            .lock()
            .records
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, state: &State, id: Option<&str>) -> Result<(), StoreError> {
        if state.unreachable {
            return Err(StoreError::Network(format!("{} is unreachable", self.name)));
        }
        if let Some(id) = id {
            if state.failing_ids.iter().any(|f| f == id) {
                return Err(StoreError::Status {
                    status: 500,
                    message: format!("injected failure for {}", id),
                });
            }
        }
        Ok(())
    }

    fn matches(&self, record: &Record, id: &str) -> bool {
        record.get(&self.identity_field).and_then(|v| v.as_str()) == Some(id)
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list(&self, collection: &str, query: &Query) -> Result<ListPage, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::List {
            collection: collection.to_string(),
            query: query.to_query_string(),
        });
        self.check(&state, None)?;
        let mut entities = state.records.get(collection).cloned().unwrap_or_default();
        if let Some(top) = query.top {
            entities.truncate(top as usize);
        }
        Ok(ListPage::new(entities))
    }

    async fn retrieve(
        &self,
        collection: &str,
        id: &str,
        _query: &Query,
    ) -> Result<Option<Record>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Retrieve {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self.check(&state, Some(id))?;
        Ok(state
            .records
            .get(collection)
            .and_then(|rows| rows.iter().find(|r| self.matches(r, id)).cloned()))
    }

    async fn create(&self, collection: &str, payload: &Payload) -> Result<Record, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Create {
            collection: collection.to_string(),
            payload: payload.clone(),
        });
        self.check(&state, None)?;
        let mut record = payload.as_map().clone();
        record.insert(
            self.identity_field.clone(),
            JsonValue::String(Uuid::new_v4().to_string()),
        );
        state
            .records
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        payload: &Payload,
    ) -> Result<Option<Record>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            payload: payload.clone(),
        });
        self.check(&state, Some(id))?;
        let row = state
            .records
            .get_mut(collection)
            .and_then(|rows| rows.iter_mut().find(|r| self.matches(r, id)))
            .ok_or_else(|| StoreError::NotFound(format!("{}({})", collection, id)))?;
        for (key, value) in payload.as_map() {
            row.insert(key.clone(), value.clone());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self.check(&state, Some(id))?;
        if let Some(rows) = state.records.get_mut(collection) {
            rows.retain(|r| !self.matches(r, id));
        }
        Ok(())
    }

    async fn entity_set_name(&self, logical_name: &str) -> Result<String, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::EntitySetName {
            logical_name: logical_name.to_string(),
        });
        self.check(&state, None)?;
        state
            .entity_sets
            .get(logical_name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("no entity definition for '{}'", logical_name)))
    }

    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::PrimaryIdAttribute {
            entity_set: entity_set.to_string(),
        });
        self.check(&state, None)?;
        state
            .primary_ids
            .get(entity_set)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("no entity definition for set '{}'", entity_set)))
    }
}
