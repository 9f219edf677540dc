//! Core types and traits for recordgate
//!
//! This crate defines the foundational types used throughout the layer:
//! - FieldValue: in-memory value of one record field
//! - RecordRef: pointer to a record in another collection
//! - FieldKind / FieldSet: what feature code hands to create and update
//! - Payload / Record: wire body sent to, and JSON object received from, the store
//! - Query: OData-style list parameters
//! - EntityStore: the remote store boundary
//! - Error / StoreError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod payload;
pub mod query;
pub mod reference;
pub mod traits;
pub mod value;

pub use error::{Error, Operation, Result, StoreError};
pub use field::{Field, FieldKind, FieldSet};
pub use payload::{Payload, Record};
pub use query::Query;
pub use reference::{bind_key, bind_path, normalize_id, RecordRef, BIND_SUFFIX};
pub use traits::{EntityStore, ListPage};
pub use value::FieldValue;
