//! Storage backend abstraction for the record store.
//!
//! This module defines the traits that abstract over storage implementations so the record
//! store, and everything built on it, can move to a real persistence engine without changing
//! its callers.
//!
//! # Traits
//!
//! - [`RecordBackend`]: The core trait for storage backends
//! - [`RecordBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use shelfkeep_core::{backend::RecordBackend, predicate::Predicate};
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! backend.insert_one("books", doc! { "id": 1, "title": "Clean Code" });
//! let found = backend.find_one("books", &Predicate::field("id", 1)).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::StoreResult, predicate::Predicate, record::SharedRecord};

/// Abstract interface for record storage backends.
///
/// Collections are ordered and keyed by name. Records come back as [`SharedRecord`]
/// handles that alias backend storage, so a caller mutating a returned record changes what
/// later queries observe.
///
/// # Async Runtime
///
/// Lookups are async so a persistent backend can suspend on I/O. Insertion and deletion
/// are synchronous and infallible.
///
/// # Isolation
///
/// None. Each call is applied on its own; a `find` followed by an `insert_one` is not a
/// transaction, and concurrent callers see whatever interleaving the scheduler produces.
#[async_trait]
pub trait RecordBackend: Send + Sync + Debug {
    /// Returns the records of `collection` in insertion order.
    ///
    /// With no predicate every record is returned. With a predicate, the returned records
    /// are the matches in their original relative order, possibly none. A collection that
    /// does not exist yields an empty vector.
    ///
    /// # Arguments
    ///
    /// * `collection` - The name of the collection to read
    /// * `predicate` - Optional fields every returned record must match
    async fn find(&self, collection: &str, predicate: Option<&Predicate>) -> Vec<SharedRecord>;

    /// Returns the first record of `collection`, in insertion order, that matches `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::error::StoreError::NotFound) if no record matches.
    async fn find_one(&self, collection: &str, predicate: &Predicate) -> StoreResult<SharedRecord>;

    /// Appends a record to the end of `collection`, creating the collection if needed.
    ///
    /// No key is checked: inserting a record whose `id` already exists leaves two records
    /// with that id, and `find_one` keeps returning the earlier one.
    fn insert_one(&self, collection: &str, record: Document);

    /// Removes the first record of `collection` that matches `predicate`.
    ///
    /// If nothing matches, the call does nothing.
    fn delete_one(&self, collection: &str, predicate: &Predicate);

    /// Lists the names of all collections known to the backend.
    async fn list_collections(&self) -> Vec<String>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> RecordBackend for &B
where
    B: RecordBackend + ?Sized,
{
    async fn find(&self, collection: &str, predicate: Option<&Predicate>) -> Vec<SharedRecord> {
        (**self).find(collection, predicate).await
    }

    async fn find_one(&self, collection: &str, predicate: &Predicate) -> StoreResult<SharedRecord> {
        (**self).find_one(collection, predicate).await
    }

    fn insert_one(&self, collection: &str, record: Document) {
        (**self).insert_one(collection, record)
    }

    fn delete_one(&self, collection: &str, predicate: &Predicate) {
        (**self).delete_one(collection, predicate)
    }

    async fn list_collections(&self) -> Vec<String> {
        (**self).list_collections().await
    }
}

/// Factory trait for backends that need asynchronous setup.
#[async_trait]
pub trait RecordBackendBuilder {
    type Backend: RecordBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
