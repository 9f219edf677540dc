//! Metadata resolution
//!
//! Building a bind path needs the plural wire-name of the referenced
//! collection (`systemuser` → `systemusers`, `opportunity` →
//! `opportunities`), and stripping the identity alias from an update needs
//! the collection's primary-key attribute (`accounts` → `accountid`). Only
//! the store knows either, so every resolution is a metadata call. There is
//! no pluralization or suffix fallback: a name the store cannot resolve
//! fails the enclosing operation.

use async_trait::async_trait;
use recordgate_core::{EntityStore, Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a collection's logical name to its plural wire-name
///
/// The trait is object-safe for use as `Arc<dyn MetadataResolver>`.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolve `logical_name` to the name used in collection paths
    ///
    /// # Errors
    ///
    /// Returns `MetadataUnavailable` if the name cannot be resolved.
    async fn resolve(&self, logical_name: &str) -> Result<String>;

    /// Primary-key attribute of the collection addressed as `entity_set`
    ///
    /// # Errors
    ///
    /// Returns `MetadataUnavailable` if the store cannot answer.
    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String>;
}

/// Resolver that asks the store on every call
pub struct StoreMetadataResolver {
    store: Arc<dyn EntityStore>,
}

impl StoreMetadataResolver {
    /// Create a resolver backed by `store`
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        StoreMetadataResolver { store }
    }

    /// Name of the backing store instance
    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}

#[async_trait]
impl MetadataResolver for StoreMetadataResolver {
    async fn resolve(&self, logical_name: &str) -> Result<String> {
        if logical_name.is_empty() {
            return Err(Error::metadata_unavailable(
                logical_name,
                "reference carries no collection name",
            ));
        }

        match self.store.entity_set_name(logical_name).await {
            Ok(name) if !name.is_empty() => {
                debug!(
                    target: "recordgate::metadata",
                    store = self.store.name(),
                    logical_name,
                    entity_set = %name,
                    "Resolved entity set name"
                );
                Ok(name)
            }
            Ok(_) => {
                warn!(target: "recordgate::metadata", logical_name, "Store returned an empty entity set name");
                Err(Error::metadata_unavailable(
                    logical_name,
                    "store returned an empty entity set name",
                ))
            }
            Err(e) => {
                warn!(target: "recordgate::metadata", logical_name, error = %e, "Metadata lookup failed");
                Err(Error::metadata_unavailable(logical_name, e.to_string()))
            }
        }
    }

    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String> {
        if entity_set.is_empty() {
            return Err(Error::metadata_unavailable(entity_set, "no collection name"));
        }

        match self.store.primary_id_attribute(entity_set).await {
            Ok(attribute) if !attribute.is_empty() => {
                debug!(
                    target: "recordgate::metadata",
                    store = self.store.name(),
                    entity_set,
                    attribute = %attribute,
                    "Resolved primary id attribute"
                );
                Ok(attribute)
            }
            Ok(_) => Err(Error::metadata_unavailable(
                entity_set,
                "store returned an empty primary id attribute",
            )),
            Err(e) => {
                warn!(target: "recordgate::metadata", entity_set, error = %e, "Primary id lookup failed");
                Err(Error::metadata_unavailable(entity_set, e.to_string()))
            }
        }
    }
}
