//! recordgate - generic record access for entity-record Web APIs
//!
//! Feature code reads and writes records through one façade,
//! [`RecordAccess`]. Each call is served by the live store when the
//! [`BackendProbe`] reports one, and by a delayed in-process mock
//! otherwise, so screens behave the same with or without a backend.
//!
//! # Quick Start
//!
//! ```ignore
//! use recordgate::{FieldSet, RecordAccess, RecordRef, StaticProbe};
//!
//! let access = RecordAccess::new(Arc::new(StaticProbe::live(store)));
//!
//! // Reference fields are sent as "owner@bind": "/systemusers(6f1c...)"
//! let fields = FieldSet::new()
//!     .scalar("title", "Replace pump seal")
//!     .lookup("owner", RecordRef::new("users", "{6f1c...}"));
//! let created = access.create("workorders", &fields).await?;
//!
//! let open = access
//!     .get("workorders", Some("status eq 1"), Some(&["title", "status"]), None)
//!     .await?;
//! ```
//!
//! # Architecture
//!
//! | Crate | Role |
//! |-------|------|
//! | `recordgate-core` | values, references, field sets, queries, errors, `EntityStore` |
//! | `recordgate-encoding` | metadata resolution and field encoding |
//! | `recordgate-adapters` | live and mock adapters, HTTP store |
//! | `recordgate-api` | façade, probes, bulk fan-out, configuration |

pub use recordgate_adapters::{
    AdapterKind, LiveAdapter, MockAdapter, RecordAdapter, DEFAULT_IDENTITY_FIELD, DEFAULT_MOCK_DELAY,
};
#[cfg(feature = "http")]
pub use recordgate_adapters::HttpEntityStore;
pub use recordgate_api::*;
pub use recordgate_core::{
    EntityStore, Error, Field, FieldKind, FieldSet, FieldValue, ListPage, Operation, Payload,
    Query, Record, RecordRef, Result, StoreError,
};
pub use recordgate_encoding::{
    CachedResolver, FieldEncoder, MetadataCache, MetadataResolver, StoreMetadataResolver,
};

/// In-memory store for tests and demos
pub mod testing {
    pub use recordgate_adapters::testing::*;
}
