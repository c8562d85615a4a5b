//! Core error types for the symbols collection.
//!
//! Backing stores convert their own failures into [`StorageError`] so that
//! callers only ever see this crate's [`Error`].

use thiserror::Error;

use crate::catalog::IndexPath;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for favorite and catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Batch delete partially failed: {0}")]
    Batch(#[from] AggregateBatchError),

    #[error("Failed to load catalog: {0}")]
    Catalog(String),

    #[error("No item at {0}")]
    InvalidIndexPath(IndexPath),
}

/// Backing-store failure for a single operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The store is not accepting work (its worker stopped).
    #[error("Favorite store unavailable: {0}")]
    Unavailable(String),

    /// The backing rejected the operation.
    #[error("Favorite store operation failed: {0}")]
    OperationFailed(String),
}

/// Produced by `delete_batch` when at least one constituent deletion failed.
///
/// Carries the distinct underlying messages in first-seen order. It does not
/// say which pairs failed; deletions that succeeded remain applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .messages.join("; "))]
pub struct AggregateBatchError {
    pub messages: Vec<String>,
}

impl AggregateBatchError {
    /// Builds the aggregate from individual failures, dropping repeated messages.
    pub fn from_errors<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Error>,
    {
        let mut messages: Vec<String> = Vec::new();
        for error in errors {
            let message = error.to_string();
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
