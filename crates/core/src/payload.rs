//! Operation payloads and records
//!
//! A [`Payload`] is the JSON body of exactly one create or update call.
//! It is built by the field encoder right before dispatch and dropped
//! afterwards; nothing keeps or reuses it.
//!
//! A [`Record`] is what the store hands back: a JSON object keyed by
//! attribute name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Record as returned by the store
pub type Record = Map<String, JsonValue>;

/// Wire body of one create or update call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, JsonValue>);

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    /// Get an entry
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over keys
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_map(self) -> Map<String, JsonValue> {
        self.0
    }

    /// Payload as a JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.0.clone())
    }
}

impl From<Map<String, JsonValue>> for Payload {
    fn from(map: Map<String, JsonValue>) -> Self {
        Payload(map)
    }
}

impl FromIterator<(String, JsonValue)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Payload(iter.into_iter().collect())
    }
}
