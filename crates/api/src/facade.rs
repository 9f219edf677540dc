//! Record access façade
//!
//! Single entry point feature code uses to read and write records. Every
//! call asks the [`BackendProbe`] which adapter serves it:
//!
//! | Probe answer | Adapter |
//! |--------------|---------|
//! | `Some(store)` | [`LiveAdapter`] over `store` |
//! | `None` | [`MockAdapter`] |
//!
//! The choice is made per call, never cached, and never revised after a
//! failure. Errors leave the façade wrapped as `Error::Operation` carrying
//! the operation and collection.
//!
//! ## Operations
//!
//! | Façade | Adapter |
//! |--------|---------|
//! | `get(c, filter, select, order_by)` | `get(c, query)` |
//! | `query(c, q)` | `get(c, q)` |
//! | `retrieve(c, id, select)` | `retrieve(c, id, query)` |
//! | `create(c, fields)` | `create(c, fields)` |
//! | `update(c, id, fields)` | `identity_alias(c)` then `update(c, id, fields - identity)` |
//! | `delete(c, id)` | `delete(c, id)` |
//! | `copy_record(s, id, t, fields)` | `retrieve(s, id)` then `create(t, ..)` |
//!
//! A configured `[identity_aliases]` entry names a collection's alias;
//! otherwise the adapter reports it (the store's primary-key attribute
//! when live, none offline).

use crate::config::AccessConfig;
use crate::environment::BackendProbe;
use recordgate_adapters::{LiveAdapter, MockAdapter, RecordAdapter};
use recordgate_core::{
    normalize_id, EntityStore, Error, Field, FieldKind, FieldSet, FieldValue, Operation, Query,
    Record, RecordRef, Result,
};
use recordgate_encoding::{CachedResolver, MetadataCache, MetadataResolver, StoreMetadataResolver};
use std::sync::Arc;
use tracing::{debug, warn};

/// Annotation naming the entity type behind a `_x_value` projection
const LOOKUP_LOGICAL_NAME: &str = "@Microsoft.Dynamics.CRM.lookuplogicalname";

/// Record access entry point
pub struct RecordAccess {
    probe: Arc<dyn BackendProbe>,
    mock: Arc<MockAdapter>,
    config: AccessConfig,
    metadata_cache: Option<Arc<MetadataCache>>,
}

impl RecordAccess {
    /// Façade with default settings
    pub fn new(probe: Arc<dyn BackendProbe>) -> Self {
        Self::with_config(probe, &AccessConfig::default())
    }

    /// Façade configured from `config`
    ///
    /// A metadata cache is created when `cache_metadata` is set.
    pub fn with_config(probe: Arc<dyn BackendProbe>, config: &AccessConfig) -> Self {
        let mock = MockAdapter::new()
            .with_delay(config.mock_delay())
            .with_identity_field(config.identity_field.clone());
        RecordAccess {
            probe,
            mock: Arc::new(mock),
            config: config.clone(),
            metadata_cache: config
                .cache_metadata
                .then(|| Arc::new(MetadataCache::new())),
        }
    }

    /// Share `cache` for entity-set name resolution
    pub fn with_metadata_cache(mut self, cache: Arc<MetadataCache>) -> Self {
        self.metadata_cache = Some(cache);
        self
    }

    /// The metadata cache in use, if any
    pub fn metadata_cache(&self) -> Option<&Arc<MetadataCache>> {
        self.metadata_cache.as_ref()
    }

    /// Settings this façade was built from
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Adapter serving the next call
    pub fn adapter(&self) -> Arc<dyn RecordAdapter> {
        match self.probe.live_store() {
            Some(store) => Arc::new(self.live_adapter(store)),
            None => Arc::clone(&self.mock) as Arc<dyn RecordAdapter>,
        }
    }

    fn live_adapter(&self, store: Arc<dyn EntityStore>) -> LiveAdapter {
        let uncached = StoreMetadataResolver::new(Arc::clone(&store));
        let resolver: Arc<dyn MetadataResolver> = match &self.metadata_cache {
            Some(cache) => {
                let name = store.name().to_string();
                Arc::new(CachedResolver::new(uncached, name, Arc::clone(cache)))
            }
            None => Arc::new(uncached),
        };
        LiveAdapter::new(store, resolver)
    }

    async fn identity_alias(
        &self,
        adapter: &dyn RecordAdapter,
        collection: &str,
    ) -> Result<Option<String>> {
        match self.config.identity_alias(collection) {
            Some(alias) => Ok(Some(alias.to_string())),
            None => adapter.identity_alias(collection).await,
        }
    }

    fn dispatch(&self, operation: Operation, collection: &str) -> Arc<dyn RecordAdapter> {
        let adapter = self.adapter();
        debug!(
            target: "recordgate::facade",
            %operation,
            collection,
            adapter = %adapter.kind(),
            "Dispatching"
        );
        adapter
    }

    fn wrap(operation: Operation, collection: &str, error: Error) -> Error {
        warn!(
            target: "recordgate::facade",
            %operation,
            collection,
            error = %error,
            "Record operation failed"
        );
        error.in_operation(operation, collection)
    }

    /// List records of `collection`
    ///
    /// Only the parameters supplied are sent; an empty `select` counts as
    /// absent.
    pub async fn get(
        &self,
        collection: &str,
        filter: Option<&str>,
        select: Option<&[&str]>,
        order_by: Option<&str>,
    ) -> Result<Vec<Record>> {
        let mut query = Query::new();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        if let Some(select) = select {
            query = query.select(select.iter().copied());
        }
        if let Some(order_by) = order_by {
            query = query.order_by(order_by);
        }
        self.query(collection, &query).await
    }

    /// List records of `collection` with a prepared query
    pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>> {
        self.dispatch(Operation::Get, collection)
            .get(collection, query)
            .await
            .map_err(|e| Self::wrap(Operation::Get, collection, e))
    }

    /// Fetch one record, `None` if it does not exist
    pub async fn retrieve(
        &self,
        collection: &str,
        id: &str,
        select: Option<&[&str]>,
    ) -> Result<Option<Record>> {
        let query = match select {
            Some(select) => Query::new().select(select.iter().copied()),
            None => Query::new(),
        };
        self.dispatch(Operation::Retrieve, collection)
            .retrieve(collection, id, &query)
            .await
            .map_err(|e| Self::wrap(Operation::Retrieve, collection, e))
    }

    /// Create a record
    pub async fn create(&self, collection: &str, fields: &FieldSet) -> Result<Record> {
        self.dispatch(Operation::Create, collection)
            .create(collection, fields)
            .await
            .map_err(|e| Self::wrap(Operation::Create, collection, e))
    }

    /// Update the record `id`
    ///
    /// The identity field and the collection's identity alias are removed
    /// from `fields`; `id` alone addresses the record. Live, a failed alias
    /// lookup fails the update with `MetadataUnavailable`.
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Record>> {
        let adapter = self.dispatch(Operation::Update, collection);
        let result = async {
            let alias = self.identity_alias(adapter.as_ref(), collection).await?;
            let mut excluded = vec![self.config.identity_field.as_str()];
            excluded.extend(alias.as_deref());
            adapter
                .update(collection, id, &fields.without(&excluded))
                .await
        }
        .await;
        result.map_err(|e| Self::wrap(Operation::Update, collection, e))
    }

    /// Delete the record `id`
    pub async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.dispatch(Operation::Delete, collection)
            .delete(collection, id)
            .await
            .map_err(|e| Self::wrap(Operation::Delete, collection, e))
    }

    /// Create a record in `target` from an existing record of `source`
    ///
    /// The source record's writable values are copied, `fields` is laid on
    /// top, and the result is created in `target`. Lookups read back as
    /// `_x_value` projections are rebuilt as references when the store
    /// annotated their logical name. Every step runs on the adapter selected
    /// when the call starts. A missing source fails with `NotFound`; this is
    /// always the case offline, since the mock holds no records.
    pub async fn copy_record(
        &self,
        source: &str,
        id: &str,
        target: &str,
        fields: &FieldSet,
    ) -> Result<Record> {
        let adapter = self.dispatch(Operation::Create, target);
        let original = adapter
            .retrieve(source, id, &Query::new())
            .await
            .and_then(|found| found.ok_or_else(|| Error::not_found(source, normalize_id(id))))
            .map_err(|e| Self::wrap(Operation::Retrieve, source, e))?;
        let alias = self
            .identity_alias(adapter.as_ref(), source)
            .await
            .map_err(|e| Self::wrap(Operation::Retrieve, source, e))?;

        let copied = self
            .copyable_fields(&original, alias.as_deref())
            .merge(fields.clone());
        debug!(
            target: "recordgate::facade",
            source,
            target,
            fields = copied.len(),
            "Copying record"
        );
        adapter
            .create(target, &copied)
            .await
            .map_err(|e| Self::wrap(Operation::Create, target, e))
    }

    fn copyable_fields(&self, record: &Record, alias: Option<&str>) -> FieldSet {
        let mut copied = FieldSet::new();
        for (name, value) in record {
            if *name == self.config.identity_field
                || Some(name.as_str()) == alias
                || name.contains('@')
            {
                continue;
            }
            if let Some(field) = lookup_projection(name) {
                let entity_type = record
                    .get(&format!("{}{}", name, LOOKUP_LOGICAL_NAME))
                    .and_then(|v| v.as_str());
                match (entity_type, value.as_str()) {
                    (Some(entity_type), Some(id)) => copied.insert(Field::new(
                        field,
                        RecordRef::new(entity_type, id),
                        FieldKind::Lookup,
                    )),
                    _ => debug!(
                        target: "recordgate::facade",
                        field = name.as_str(),
                        "Lookup projection without logical name not copied"
                    ),
                }
                continue;
            }
            if let Some(value) = FieldValue::from_json(value) {
                let kind = if value.as_references().is_some() {
                    FieldKind::Lookup
                } else {
                    FieldKind::Scalar
                };
                copied.insert(Field::new(name.clone(), value, kind));
            }
        }
        copied
    }
}

/// Field name behind a `_x_value` lookup projection
fn lookup_projection(name: &str) -> Option<&str> {
    name.strip_prefix('_')?
        .strip_suffix("_value")
        .filter(|field| !field.is_empty())
}
