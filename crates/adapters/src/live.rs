//! Live backend adapter
//!
//! Maps each record operation 1:1 onto an [`EntityStore`] primitive.
//! Outgoing field sets go through the [`FieldEncoder`]; list results are
//! unwrapped from the store's page envelope. Store failures surface as
//! `RemoteOperationFailed`, encoding failures as whatever the encoder
//! raised. Nothing is retried and nothing falls back to the mock.

use crate::adapter::{AdapterKind, RecordAdapter};
use async_trait::async_trait;
use recordgate_core::{normalize_id, EntityStore, FieldSet, Query, Record, Result};
use recordgate_encoding::{FieldEncoder, MetadataResolver, StoreMetadataResolver};
use std::sync::Arc;
use tracing::debug;

/// Adapter backed by a remote entity store
pub struct LiveAdapter {
    store: Arc<dyn EntityStore>,
    resolver: Arc<dyn MetadataResolver>,
    encoder: FieldEncoder,
}

impl LiveAdapter {
    /// Create an adapter resolving metadata through `resolver`
    pub fn new(store: Arc<dyn EntityStore>, resolver: Arc<dyn MetadataResolver>) -> Self {
        LiveAdapter {
            store,
            encoder: FieldEncoder::new(Arc::clone(&resolver)),
            resolver,
        }
    }

    /// Create an adapter that resolves metadata through the store itself,
    /// uncached
    pub fn with_store(store: Arc<dyn EntityStore>) -> Self {
        let resolver = Arc::new(StoreMetadataResolver::new(Arc::clone(&store)));
        Self::new(store, resolver)
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }
}

#[async_trait]
impl RecordAdapter for LiveAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Live
    }

    async fn get(&self, collection: &str, query: &Query) -> Result<Vec<Record>> {
        let page = self.store.list(collection, query).await?;
        if page.next_link.is_some() {
            debug!(
                target: "recordgate::live",
                collection,
                returned = page.entities.len(),
                "Store paged the result; returning the first page only"
            );
        }
        Ok(page.entities)
    }

    async fn retrieve(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
    ) -> Result<Option<Record>> {
        Ok(self
            .store
            .retrieve(collection, &normalize_id(id), query)
            .await?)
    }

    async fn create(&self, collection: &str, fields: &FieldSet) -> Result<Record> {
        let payload = self.encoder.encode(fields).await?;
        debug!(target: "recordgate::live", collection, keys = payload.len(), "Creating record");
        Ok(self.store.create(collection, &payload).await?)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Record>> {
        let payload = self.encoder.encode(fields).await?;
        let id = normalize_id(id);
        debug!(target: "recordgate::live", collection, id = %id, keys = payload.len(), "Updating record");
        Ok(self.store.update(collection, &id, &payload).await?)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        Ok(self.store.delete(collection, &normalize_id(id)).await?)
    }

    async fn identity_alias(&self, collection: &str) -> Result<Option<String>> {
        self.resolver.primary_id_attribute(collection).await.map(Some)
    }
}
