//! Collection types for record store operations.
//!
//! This module provides the per-collection views handed out by
//! [`RecordStore`](crate::store::RecordStore):
//!
//! - [`Collection`] - Untyped collection working with raw BSON documents
//! - [`TypedCollection`] - Collection whose records decode as a specific [`Record`] type
//!
//! # Example
//!
//! ```ignore
//! use shelfkeep_core::{predicate::Predicate, record::Record};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Book {
//!     pub id: i64,
//!     pub title: String,
//! }
//!
//! impl Record for Book {
//!     fn collection_name() -> &'static str { "books" }
//! }
//!
//! # async fn example(store: &shelfkeep_core::store::RecordStore<impl shelfkeep_core::backend::RecordBackend>) -> shelfkeep_core::error::StoreResult<()> {
//! let books = store.typed_collection::<Book>();
//! books.insert_one(&Book { id: 1, title: "Clean Code".to_string() })?;
//! let found = books.find_one(&Predicate::field("id", 1)).await?;
//! # Ok(()) }
//! ```

use bson::Document;
use std::marker::PhantomData;

use crate::{
    backend::RecordBackend,
    error::StoreResult,
    predicate::Predicate,
    record::{Record, RecordExt, SharedRecord, TypedRecord},
};

/// An untyped collection with a reference to a storage backend.
///
/// Records are plain BSON documents. Lookups return [`SharedRecord`] handles that alias the
/// stored records.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Collection<'a, B: RecordBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: RecordBackend> Collection<'a, B> {
    /// Creates a new collection reference (internal use).
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the records of this collection in insertion order, optionally filtered.
    ///
    /// # Arguments
    ///
    /// * `predicate` - Fields each returned record must carry with equal values; `None` returns all records
    pub async fn find(&self, predicate: Option<&Predicate>) -> Vec<SharedRecord> {
        self.backend
            .find(self.name(), predicate)
            .await
    }

    /// Returns the first record, in insertion order, matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::error::StoreError::NotFound) if no record matches.
    pub async fn find_one(&self, predicate: &Predicate) -> StoreResult<SharedRecord> {
        self.backend
            .find_one(self.name(), predicate)
            .await
    }

    /// Appends a record to the end of the collection.
    pub fn insert_one(&self, record: Document) {
        self.backend.insert_one(self.name(), record)
    }

    /// Removes the first record matching `predicate`; does nothing if none matches.
    pub fn delete_one(&self, predicate: &Predicate) {
        self.backend.delete_one(self.name(), predicate)
    }
}

/// A typed collection for records of type `R`.
///
/// The collection name comes from [`Record::collection_name`]. Lookups return
/// [`TypedRecord`] handles which decode lazily, so a record that no longer fits `R`
/// only fails when it is read.
#[derive(Debug)]
pub struct TypedCollection<'a, B: RecordBackend, R: Record> {
    inner: Collection<'a, B>,
    _marker: PhantomData<fn() -> R>,
}

impl<'a, B: RecordBackend, R: Record> TypedCollection<'a, B, R> {
    /// Creates a new typed collection reference (internal use).
    pub(crate) fn new(backend: &'a B) -> Self {
        Self {
            inner: Collection::new(R::collection_name().to_string(), backend),
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Returns the underlying untyped collection.
    pub fn untyped(&self) -> &Collection<'a, B> {
        &self.inner
    }

    /// Returns handles to the records of this collection in insertion order, optionally filtered.
    pub async fn find(&self, predicate: Option<&Predicate>) -> Vec<TypedRecord<R>> {
        self.inner
            .find(predicate)
            .await
            .into_iter()
            .map(TypedRecord::new)
            .collect()
    }

    /// Returns a handle to the first record matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::error::StoreError::NotFound) if no record matches.
    pub async fn find_one(&self, predicate: &Predicate) -> StoreResult<TypedRecord<R>> {
        Ok(TypedRecord::new(self.inner.find_one(predicate).await?))
    }

    /// Decodes every record matching `predicate` into owned values.
    ///
    /// The returned values are copies; changing them does not touch the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`](crate::error::StoreError::Serialization) if a stored
    /// record does not decode as `R`.
    pub async fn load(&self, predicate: Option<&Predicate>) -> StoreResult<Vec<R>> {
        self.find(predicate)
            .await
            .iter()
            .map(TypedRecord::get)
            .collect()
    }

    /// Encodes `record` and appends it to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`](crate::error::StoreError::Serialization) if the record
    /// cannot be encoded. Nothing is inserted in that case.
    pub fn insert_one(&self, record: &R) -> StoreResult<()> {
        self.inner.insert_one(record.to_document()?);
        Ok(())
    }

    /// Removes the first record matching `predicate`; does nothing if none matches.
    pub fn delete_one(&self, predicate: &Predicate) {
        self.inner.delete_one(predicate)
    }
}
