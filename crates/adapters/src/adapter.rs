//! Record adapter trait
//!
//! An adapter is one interchangeable implementation of the façade's
//! operations. Exactly two exist: [`LiveAdapter`](crate::LiveAdapter) talks
//! to a real store, [`MockAdapter`](crate::MockAdapter) stands in when no
//! store is reachable. The façade picks one per call and never falls back
//! from one to the other after a failure.

use async_trait::async_trait;
use recordgate_core::{FieldSet, Query, Record, Result};
use std::fmt;

/// Which implementation served a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Backed by a remote entity store
    Live,
    /// In-process stand-in
    Mock,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::Live => f.write_str("live"),
            AdapterKind::Mock => f.write_str("mock"),
        }
    }
}

/// One implementation of the record-access operations
///
/// Identities may arrive brace-wrapped; implementations normalize them
/// before addressing a record. Each call performs one I/O suspension
/// (network round trip or artificial delay) and does not retry.
#[async_trait]
pub trait RecordAdapter: Send + Sync {
    /// Which implementation this is
    fn kind(&self) -> AdapterKind;

    /// List records of `collection` matching `query`
    async fn get(&self, collection: &str, query: &Query) -> Result<Vec<Record>>;

    /// Fetch one record, `None` if it does not exist
    async fn retrieve(&self, collection: &str, id: &str, query: &Query)
        -> Result<Option<Record>>;

    /// Create a record from `fields`
    async fn create(&self, collection: &str, fields: &FieldSet) -> Result<Record>;

    /// Update the record `id` with `fields`
    async fn update(&self, collection: &str, id: &str, fields: &FieldSet)
        -> Result<Option<Record>>;

    /// Delete the record `id`
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Primary-key attribute of `collection`, when this implementation
    /// knows it
    async fn identity_alias(&self, collection: &str) -> Result<Option<String>>;
}
