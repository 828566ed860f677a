//! In-memory storage implementation for record stores.
//!
//! This module provides a simple backend that keeps every collection as an ordered vector of
//! [`SharedRecord`] handles, looked up by name.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use async_trait::async_trait;
use bson::Document;
use tracing::trace;

use shelfkeep_core::{
    backend::{RecordBackend, RecordBackendBuilder},
    error::{StoreError, StoreResult},
    predicate::Predicate,
    record::SharedRecord,
};

use crate::evaluator::RecordEvaluator;

type CollectionVec = Vec<SharedRecord>;
type StoreMap = HashMap<String, CollectionVec>;


/// In-memory record storage backend.
///
/// This struct implements the [`RecordBackend`] trait over process memory. Records are kept
/// in insertion order and returned as handles into that storage, so mutating a returned
/// record is visible to later lookups.
///
/// # Sharing
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Multiple clones
/// of the same instance share the same underlying data.
///
/// # Isolation
///
/// Each operation takes the store lock for its own duration only. There is no isolation
/// across operations: a lookup followed by a delete may interleave with other callers.
///
/// # Performance
///
/// Lookups scan the collection front to back (no indexing).
///
/// # Example
///
/// ```ignore
/// use shelfkeep_memory::InMemoryStore;
/// use shelfkeep_core::{backend::RecordBackend, predicate::Predicate};
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     store.insert_one("books", doc! { "id": 1, "title": "Clean Code" });
///
///     let found = store.find("books", Some(&Predicate::field("id", 1))).await;
///     assert_eq!(found.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// The main storage map: collection_name -> records in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory record store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore` with seed data.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use shelfkeep_memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::builder()
    ///     .seed("books", vec![doc! { "id": 1, "title": "Clean Code" }])
    ///     .build()
    ///     .await
    ///     .unwrap();
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Returns the number of records currently in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if `collection` holds no records.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    // Poisoning only means another thread panicked mid-operation; every operation leaves
    // the vectors structurally valid, so the data is still usable.
    fn read(&self) -> RwLockReadGuard<'_, StoreMap> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreMap> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn first_match(records: &[SharedRecord], predicate: &Predicate) -> Option<usize> {
        records
            .iter()
            .position(|record| record.read(|doc| RecordEvaluator::matches(doc, predicate)))
    }
}


#[async_trait]
impl RecordBackend for InMemoryStore {
    async fn find(&self, collection: &str, predicate: Option<&Predicate>) -> Vec<SharedRecord> {
        let store = self.read();
        let records = match store.get(collection) {
            Some(col) => col,
            None => return vec![],
        };

        let found = match predicate {
            Some(predicate) => records
                .iter()
                .filter(|record| record.read(|doc| RecordEvaluator::matches(doc, predicate)))
                .cloned()
                .collect::<Vec<_>>(),
            None => records.clone(),
        };

        trace!(collection, matched = found.len(), "find");

        found
    }

    async fn find_one(&self, collection: &str, predicate: &Predicate) -> StoreResult<SharedRecord> {
        let store = self.read();
        let records = store
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match Self::first_match(records, predicate) {
            Some(index) => Ok(records[index].clone()),
            None => {
                trace!(collection, "find_one matched nothing");
                Err(StoreError::not_found(collection))
            },
        }
    }

    fn insert_one(&self, collection: &str, record: Document) {
        let mut store = self.write();
        let records = store
            .entry(collection.to_string())
            .or_default();

        records.push(SharedRecord::new(record));

        trace!(collection, len = records.len(), "insert_one");
    }

    fn delete_one(&self, collection: &str, predicate: &Predicate) {
        let mut store = self.write();
        let records = match store.get_mut(collection) {
            Some(col) => col,
            None => return,
        };

        if let Some(index) = Self::first_match(records, predicate) {
            records.remove(index);
            trace!(collection, index, "delete_one");
        }
    }

    async fn list_collections(&self) -> Vec<String> {
        self.read()
            .keys()
            .cloned()
            .collect()
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// Seed records are appended in the order given, collection by collection.
///
/// # Example
///
/// ```ignore
/// use shelfkeep_memory::InMemoryStore;
/// use shelfkeep_core::backend::RecordBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default, Debug)]
pub struct InMemoryStoreBuilder {
    seeds: Vec<(String, Vec<Document>)>,
}

impl InMemoryStoreBuilder {
    /// Appends `records` to `collection` when the store is built.
    pub fn seed(mut self, collection: impl Into<String>, records: impl IntoIterator<Item = Document>) -> Self {
        self.seeds.push((collection.into(), records.into_iter().collect()));
        self
    }
}

#[async_trait]
impl RecordBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a new [`InMemoryStore`] holding the seed records.
    ///
    /// This always succeeds.
    async fn build(self) -> StoreResult<Self::Backend> {
        let store = InMemoryStore::new();

        for (collection, records) in self.seeds {
            for record in records {
                store.insert_one(&collection, record);
            }
        }

        Ok(store)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use bson::{Bson, doc};

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_one("items", doc! { "id": 1, "name": "a" });
        store.insert_one("items", doc! { "id": 2, "name": "b" });
        store
    }

    fn ids(records: &[SharedRecord]) -> Vec<Bson> {
        records
            .iter()
            .map(|record| record.get("id").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn find_without_predicate_returns_all_in_insertion_order() {
        let store = seeded();
        store.insert_one("items", doc! { "id": 0, "name": "z" });

        let all = store.find("items", None).await;

        assert_eq!(ids(&all), vec![Bson::Int32(1), Bson::Int32(2), Bson::Int32(0)]);
        assert_eq!(all.len(), store.len("items"));
    }

    #[tokio::test]
    async fn find_preserves_relative_order_of_matches() {
        let store = seeded();
        store.insert_one("items", doc! { "id": 3, "name": "a" });

        let found = store.find("items", Some(&Predicate::field("name", "a"))).await;

        assert_eq!(ids(&found), vec![Bson::Int32(1), Bson::Int32(3)]);
    }

    #[tokio::test]
    async fn find_on_unknown_collection_is_empty() {
        let store = InMemoryStore::new();

        assert!(store.find("nothing", None).await.is_empty());
        assert!(store.find_one("nothing", &Predicate::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn find_one_returns_earliest_duplicate() {
        let store = seeded();
        store.insert_one("items", doc! { "id": 1, "name": "duplicate" });

        let first = store.find_one("items", &Predicate::field("id", 1)).await.unwrap();

        assert_eq!(first.get("name"), Some(Bson::String("a".into())));
        assert_eq!(store.len("items"), 3);
    }

    #[tokio::test]
    async fn returned_records_alias_storage() {
        let store = seeded();

        let record = store.find_one("items", &Predicate::field("id", 2)).await.unwrap();
        record.set("name", "renamed");

        let again = store.find("items", Some(&Predicate::field("name", "renamed"))).await;
        assert_eq!(again.len(), 1);
        assert!(again[0].ptr_eq(&record));
    }

    #[tokio::test]
    async fn modify_can_call_back_into_the_store() {
        let store = seeded();
        let record = store.find_one("items", &Predicate::field("id", 1)).await.unwrap();

        record.modify(|doc| {
            doc.insert("name", "renamed");
            store.delete_one("items", &Predicate::field("id", 2));
            store.insert_one("items", doc! { "id": 3, "name": "c" });
        });

        let all = store.find("items", None).await;
        assert_eq!(ids(&all), vec![Bson::Int32(1), Bson::Int32(3)]);
        assert_eq!(all[0].get("name"), Some(Bson::String("renamed".into())));
    }

    #[tokio::test]
    async fn delete_one_removes_only_first_match() {
        let store = seeded();
        store.insert_one("items", doc! { "id": 1, "name": "again" });

        store.delete_one("items", &Predicate::field("id", 1));

        let remaining = store.find("items", None).await;
        assert_eq!(ids(&remaining), vec![Bson::Int32(2), Bson::Int32(1)]);
        assert_eq!(remaining[1].get("name"), Some(Bson::String("again".into())));
    }

    #[tokio::test]
    async fn delete_one_without_match_is_a_no_op() {
        let store = seeded();
        let before = store.find("items", None).await;

        store.delete_one("items", &Predicate::field("id", 99));
        store.delete_one("missing", &Predicate::field("id", 1));

        let after = store.find("items", None).await;
        assert_eq!(after.len(), before.len());
        assert!(after.iter().zip(&before).all(|(a, b)| a.ptr_eq(b)));
        assert_eq!(store.list_collections().await, vec!["items".to_string()]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        clone.insert_one("items", doc! { "id": 1 });

        assert_eq!(store.len("items"), 1);
    }

    #[tokio::test]
    async fn builder_seeds_collections_in_order() {
        let store = InMemoryStore::builder()
            .seed("items", vec![doc! { "id": 1 }, doc! { "id": 2 }])
            .seed("others", vec![doc! { "id": 9 }])
            .build()
            .await
            .unwrap();

        assert_eq!(ids(&store.find("items", None).await), vec![Bson::Int32(1), Bson::Int32(2)]);
        assert!(!store.is_empty("others"));

        let mut names = store.list_collections().await;
        names.sort();
        assert_eq!(names, vec!["items".to_string(), "others".to_string()]);
    }
}
