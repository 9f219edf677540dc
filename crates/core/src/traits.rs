//! Core trait definitions
//!
//! This module defines the boundary to the remote entity store:
//! - EntityStore: CRUD primitives plus the metadata lookups
//!
//! The store is an external collaborator. recordgate ships an HTTP
//! implementation and an in-memory fake, but anything speaking these seven
//! primitives can sit behind the record-access layer.

use crate::error::StoreError;
use crate::payload::{Payload, Record};
use crate::query::Query;
use async_trait::async_trait;

/// Store response to a list call, before envelope unwrapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    /// Records on this page
    pub entities: Vec<Record>,
    /// Link to the next page, when the store paged the result
    pub next_link: Option<String>,
}

impl ListPage {
    /// Page holding the given records and no continuation
    pub fn new(entities: Vec<Record>) -> Self {
        ListPage {
            entities,
            next_link: None,
        }
    }
}

/// Remote entity store primitives
///
/// Collections are addressed by their wire-name, records by an identity
/// without braces. Implementations perform exactly one round trip per call
/// and never retry.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Name identifying this store instance in logs and cache keys
    fn name(&self) -> &str;

    /// List records matching the query
    async fn list(&self, collection: &str, query: &Query) -> Result<ListPage, StoreError>;

    /// Fetch one record
    ///
    /// Returns `Ok(None)` when the record does not exist.
    async fn retrieve(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
    ) -> Result<Option<Record>, StoreError>;

    /// Create a record and return the stored representation
    async fn create(&self, collection: &str, payload: &Payload) -> Result<Record, StoreError>;

    /// Update a record
    ///
    /// Returns the updated representation when the store sends one back.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        payload: &Payload,
    ) -> Result<Option<Record>, StoreError>;

    /// Delete a record
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Resolve a collection's logical name to its plural wire-name
    async fn entity_set_name(&self, logical_name: &str) -> Result<String, StoreError>;

    /// Name of the primary-key attribute of the collection whose wire-name
    /// is `entity_set` (`accounts` → `accountid`)
    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String, StoreError>;
}
