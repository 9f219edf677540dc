//! Record adapters for recordgate
//!
//! This crate holds the two interchangeable implementations of the
//! record-access operations and the stores behind them:
//! - RecordAdapter / AdapterKind: the per-call implementation seam
//! - LiveAdapter: encodes fields and forwards to an EntityStore
//! - MockAdapter: delayed offline stand-in
//! - HttpEntityStore: OData Web API store (feature `http`)
//! - testing::InMemoryEntityStore: journaling fake for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
#[cfg(feature = "http")]
pub mod http;
pub mod live;
pub mod mock;
pub mod odata;
pub mod testing;

pub use adapter::{AdapterKind, RecordAdapter};
#[cfg(feature = "http")]
pub use http::HttpEntityStore;
pub use live::LiveAdapter;
pub use mock::{MockAdapter, DEFAULT_IDENTITY_FIELD, DEFAULT_MOCK_DELAY};
