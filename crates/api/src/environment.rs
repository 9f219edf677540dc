//! Backend probes
//!
//! The façade asks a [`BackendProbe`] on every call whether a live store
//! is available. A probe that answers `None` selects the mock adapter; an
//! absent backend is a routing decision, not an error.

use parking_lot::RwLock;
use recordgate_core::EntityStore;
use std::fmt;
use std::sync::Arc;

/// Answers whether a live store is reachable right now
pub trait BackendProbe: Send + Sync {
    /// The live store, or `None` when calls should be served by the mock
    fn live_store(&self) -> Option<Arc<dyn EntityStore>>;
}

/// Probe with a fixed answer
#[derive(Clone)]
pub struct StaticProbe {
    store: Option<Arc<dyn EntityStore>>,
}

impl StaticProbe {
    /// Always answer `store`
    pub fn live(store: Arc<dyn EntityStore>) -> Self {
        StaticProbe { store: Some(store) }
    }

    /// Never report a live store
    pub fn offline() -> Self {
        StaticProbe { store: None }
    }
}

impl fmt::Debug for StaticProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticProbe")
            .field("store", &self.store.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl BackendProbe for StaticProbe {
    fn live_store(&self) -> Option<Arc<dyn EntityStore>> {
        self.store.clone()
    }
}

/// Probe whose answer the host can change at runtime
///
/// Models a host context that gains or loses its API client between calls.
/// Each call sees whichever store was installed when it started.
#[derive(Default)]
pub struct SwitchableProbe {
    store: RwLock<Option<Arc<dyn EntityStore>>>,
}

impl SwitchableProbe {
    /// Start offline
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a live store
    pub fn connect(&self, store: Arc<dyn EntityStore>) {
        *self.store.write() = Some(store);
    }

    /// Remove the live store
    pub fn disconnect(&self) {
        *self.store.write() = None;
    }

    /// Whether a live store is installed
    pub fn is_connected(&self) -> bool {
        self.store.read().is_some()
    }
}

impl BackendProbe for SwitchableProbe {
    fn live_store(&self) -> Option<Arc<dyn EntityStore>> {
        self.store.read().clone()
    }
}
