//! Field encoding for recordgate
//!
//! This crate turns in-memory field sets into store payloads:
//! - MetadataResolver: logical collection name → plural wire-name
//! - MetadataCache / CachedResolver: optional memoization of resolved names
//! - FieldEncoder: scalar pass-through and relationship binding

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod encoder;
pub mod resolver;

pub use cache::{CachedResolver, MetadataCache};
pub use encoder::FieldEncoder;
pub use resolver::{MetadataResolver, StoreMetadataResolver};
