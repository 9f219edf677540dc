//! Memoizing metadata resolution
//!
//! Entity-set names and primary-key attributes never change for the
//! lifetime of a store instance, so a resolved answer can be reused by
//! every later call. Entries are keyed
//! by store name as well as logical name: a process that switches between
//! stores never reads another store's answer. Failures are not cached.

use crate::resolver::MetadataResolver;
use async_trait::async_trait;
use dashmap::DashMap;
use recordgate_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Shared map of resolved metadata
///
/// Lock-free reads via DashMap; safe to share across concurrent calls.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<(String, String), String>,
    primary_ids: DashMap<(String, String), String>,
}

impl MetadataCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached name for `(store, logical_name)`
    pub fn get(&self, store: &str, logical_name: &str) -> Option<String> {
        self.entries
            .get(&(store.to_string(), logical_name.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// Remember a resolved name
    pub fn insert(&self, store: &str, logical_name: &str, entity_set: String) {
        self.entries
            .insert((store.to_string(), logical_name.to_string()), entity_set);
    }

    /// Cached primary-key attribute for `(store, entity_set)`
    pub fn get_primary_id(&self, store: &str, entity_set: &str) -> Option<String> {
        self.primary_ids
            .get(&(store.to_string(), entity_set.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// Remember a resolved primary-key attribute
    pub fn insert_primary_id(&self, store: &str, entity_set: &str, attribute: String) {
        self.primary_ids
            .insert((store.to_string(), entity_set.to_string()), attribute);
    }

    /// Number of cached answers of either kind
    pub fn len(&self) -> usize {
        self.entries.len() + self.primary_ids.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.primary_ids.is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.clear();
        self.primary_ids.clear();
    }
}

/// Resolver that consults a [`MetadataCache`] before its inner resolver
pub struct CachedResolver<R> {
    inner: R,
    store: String,
    cache: Arc<MetadataCache>,
}

impl<R: MetadataResolver> CachedResolver<R> {
    /// Wrap `inner`, scoping cache entries to `store`
    pub fn new(inner: R, store: impl Into<String>, cache: Arc<MetadataCache>) -> Self {
        CachedResolver {
            inner,
            store: store.into(),
            cache,
        }
    }
}

#[async_trait]
impl<R: MetadataResolver> MetadataResolver for CachedResolver<R> {
    async fn resolve(&self, logical_name: &str) -> Result<String> {
        if let Some(hit) = self.cache.get(&self.store, logical_name) {
            debug!(target: "recordgate::metadata", store = %self.store, logical_name, "Metadata cache hit");
            return Ok(hit);
        }
        let name = self.inner.resolve(logical_name).await?;
        self.cache.insert(&self.store, logical_name, name.clone());
        Ok(name)
    }

    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String> {
        if let Some(hit) = self.cache.get_primary_id(&self.store, entity_set) {
            return Ok(hit);
        }
        let attribute = self.inner.primary_id_attribute(entity_set).await?;
        self.cache
            .insert_primary_id(&self.store, entity_set, attribute.clone());
        Ok(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgate_core::Error;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        names: HashMap<&'static str, &'static str>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MetadataResolver for CountingResolver {
        async fn resolve(&self, logical_name: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.names
                .get(logical_name)
                .map(|s| s.to_string())
                .ok_or_else(|| Error::metadata_unavailable(logical_name, "unknown"))
        }

        async fn primary_id_attribute(&self, entity_set: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}-pk", entity_set))
        }
    }

    fn counting(calls: &Arc<AtomicUsize>) -> CountingResolver {
        CountingResolver {
            names: HashMap::from([("users", "systemusers")]),
            calls: calls.clone(),
        }
    }

    #[tokio::test]
    async fn test_second_resolution_is_served_from_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(MetadataCache::new());
        let resolver = CachedResolver::new(counting(&calls), "org", cache.clone());

        assert_eq!(resolver.resolve("users").await.unwrap(), "systemusers");
        assert_eq!(resolver.resolve("users").await.unwrap(), "systemusers");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(MetadataCache::new());
        let resolver = CachedResolver::new(counting(&calls), "org", cache.clone());

        assert!(resolver.resolve("ghosts").await.is_err());
        assert!(resolver.resolve("ghosts").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_entries_are_scoped_per_store() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(MetadataCache::new());
        cache.insert("other-org", "users", "wrongname".to_string());

        let resolver = CachedResolver::new(counting(&calls), "org", cache.clone());
        assert_eq!(resolver.resolve("users").await.unwrap(), "systemusers");
        assert_eq!(cache.get("other-org", "users").as_deref(), Some("wrongname"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_primary_ids_are_cached_separately() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(MetadataCache::new());
        let resolver = CachedResolver::new(counting(&calls), "org", cache.clone());

        resolver.primary_id_attribute("accounts").await.unwrap();
        resolver.primary_id_attribute("accounts").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get_primary_id("org", "accounts").as_deref(), Some("accounts-pk"));
        assert!(cache.get("org", "accounts").is_none());
    }

    #[test]
    fn test_clear() {
        let cache = MetadataCache::new();
        cache.insert("org", "users", "systemusers".to_string());
        cache.insert_primary_id("org", "accounts", "accountid".to_string());
        cache.clear();
        assert!(cache.get("org", "users").is_none());
        assert!(cache.is_empty());
    }
}
