//! Main record store interface.
//!
//! A [`RecordStore`] owns one backend and hands out per-collection views. The store is an
//! ordinary value: construct one per test, or one per process and pass it to the services
//! that need it. Nothing here is global.
//!
//! # Example
//!
//! ```ignore
//! use shelfkeep_core::store::RecordStore;
//!
//! let store = RecordStore::new(backend);
//! let books = store.typed_collection::<Book>();
//! ```

use crate::{
    backend::RecordBackend,
    collection::{Collection, TypedCollection},
    error::StoreResult,
    record::Record,
};

/// A record store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct RecordStore<B: RecordBackend> {
    backend: B,
}

impl<B: RecordBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Gets an untyped collection by name.
    pub fn collection(&self, name: impl Into<String>) -> Collection<'_, B> {
        Collection::new(name.into(), &self.backend)
    }

    /// Gets a typed collection for the specified record type.
    ///
    /// The collection name is determined by the record type's `collection_name()` method.
    pub fn typed_collection<R: Record>(&self) -> TypedCollection<'_, B, R> {
        TypedCollection::new(&self.backend)
    }

    /// Lists the names of all collections in the store.
    pub async fn list_collections(&self) -> Vec<String> {
        self.backend.list_collections().await
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shuts down the store and its backend.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await
    }
}
