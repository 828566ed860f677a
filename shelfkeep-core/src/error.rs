//! Error types and result types for record store operations.
//!
//! Only one condition is raised by the store itself: [`StoreError::NotFound`], returned by
//! `find_one` when no record matches. Inserts and deletes never fail. The remaining variant
//! covers the typed layer converting records to and from BSON.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record in the collection matched the lookup predicate.
    #[error("No matching record found in collection {collection}")]
    NotFound {
        /// The collection that was searched.
        collection: String,
    },
    /// Serialization/deserialization error when converting between record formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a [`StoreError::NotFound`] for the given collection.
    pub fn not_found(collection: impl Into<String>) -> Self {
        StoreError::NotFound { collection: collection.into() }
    }

    /// Returns `true` when this error is the "missing resource" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
