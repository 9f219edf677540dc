//! Error types for recordgate
//!
//! This module defines the error types used throughout the layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two levels exist:
//! - [`StoreError`]: what the remote entity store (or its transport) reports
//! - [`Error`]: what the record-access layer reports to feature code
//!
//! The façade wraps every adapter failure in [`Error::Operation`] so the
//! caller always learns which operation on which collection failed. The
//! original cause stays reachable through [`Error::root_cause`].

use std::fmt;
use thiserror::Error;

/// Result type alias for recordgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Façade operation names, used for error context and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List records matching a query
    Get,
    /// Retrieve a single record by identity
    Retrieve,
    /// Create a record
    Create,
    /// Update a record
    Update,
    /// Delete a record
    Delete,
}

impl Operation {
    /// Lower-case operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Retrieve => "retrieve",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by the remote entity store boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Request never completed (connection refused, DNS failure, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Store answered with a non-success status
    #[error("store returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Addressed record or collection does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Response could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Request exceeded the transport timeout
    #[error("store request timed out")]
    Timeout,
}

/// Errors raised by the record-access layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The plural wire-name of a referenced collection could not be resolved
    #[error("metadata unavailable for collection '{collection}': {reason}")]
    MetadataUnavailable {
        /// Logical name that failed to resolve
        collection: String,
        /// Why resolution failed
        reason: String,
    },

    /// The live store rejected or could not complete a call
    #[error("remote operation failed: {0}")]
    RemoteOperationFailed(#[from] StoreError),

    /// Caller supplied a value that cannot be encoded or addressed
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// A record the operation depends on does not exist
    #[error("record not found: {collection}({id})")]
    NotFound {
        /// Collection that was searched
        collection: String,
        /// Normalized identity
        id: String,
    },

    /// Configuration could not be read, parsed or validated
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },

    /// Adapter failure annotated with the façade operation and collection
    #[error("{operation} on '{collection}' failed: {source}")]
    Operation {
        /// Façade operation that failed
        operation: Operation,
        /// Collection the operation addressed
        collection: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a `MetadataUnavailable` error
    pub fn metadata_unavailable(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MetadataUnavailable {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Wrap this error with façade context
    ///
    /// Already-wrapped errors are wrapped again; the outermost context is
    /// the operation the caller invoked.
    pub fn in_operation(self, operation: Operation, collection: impl Into<String>) -> Self {
        Error::Operation {
            operation,
            collection: collection.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any `Operation` wrappers
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Operation { source, .. } = current {
            current = source;
        }
        current
    }

    /// The outermost operation context, if any
    pub fn operation(&self) -> Option<(Operation, &str)> {
        match self {
            Error::Operation {
                operation,
                collection,
                ..
            } => Some((*operation, collection.as_str())),
            _ => None,
        }
    }

    /// True when the root cause is `MetadataUnavailable`
    pub fn is_metadata_unavailable(&self) -> bool {
        matches!(self.root_cause(), Error::MetadataUnavailable { .. })
    }

    /// True when the root cause is a store failure
    pub fn is_remote_failure(&self) -> bool {
        matches!(self.root_cause(), Error::RemoteOperationFailed(_))
    }

    /// The store error at the root, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self.root_cause() {
            Error::RemoteOperationFailed(e) => Some(e),
            _ => None,
        }
    }
}
