//! Core traits and handle types for stored records.
//!
//! A record is a field/value mapping stored as a [`bson::Document`]. Lookups never hand out
//! copies: they return a [`SharedRecord`], a handle into the storage owned by the backend.
//! Mutating a record through its handle is visible to every later query against the same
//! collection.

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value, to_value};
use std::{
    fmt,
    marker::PhantomData,
    sync::{Arc, PoisonError, RwLock},
};

use crate::error::{StoreError, StoreResult};

/// Core trait for typed records kept in a record store.
///
/// A record only has to be serializable and name the collection it lives in. The store does
/// not require or enforce a unique key; `id` and `email` are lookup conventions only.
///
/// # Example
///
/// ```ignore
/// use shelfkeep_core::record::Record;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Book {
///     pub id: i64,
///     pub title: String,
/// }
///
/// impl Record for Book {
///     fn collection_name() -> &'static str {
///         "books"
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this record belongs to.
    fn collection_name() -> &'static str;
}

/// Extension trait providing conversions between typed records and stored formats.
///
/// This trait is automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Converts this record to a BSON document for storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the record does not serialize to a document.
    fn to_document(&self) -> StoreResult<Document>;

    /// Creates a record from a stored BSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the document does not have the record's shape.
    fn from_document(document: Document) -> StoreResult<Self>;

    /// Converts this record to a JSON value.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a record from a JSON value.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_document(&self) -> StoreResult<Document> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            other => Err(StoreError::Serialization(format!(
                "record for collection {} serialized to {:?}, expected a document",
                R::collection_name(),
                other.element_type(),
            ))),
        }
    }

    fn from_document(document: Document) -> StoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(document))?)
    }

    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}

/// Handle to a record owned by a backend.
///
/// Cloning a `SharedRecord` clones the handle, not the record: every clone, and the
/// collection the record was found in, observe the same underlying document. Each accessor
/// holds the record's lock only for the duration of the call, so no isolation is provided
/// across calls.
#[derive(Clone, Default)]
pub struct SharedRecord {
    inner: Arc<RwLock<Document>>,
}

impl SharedRecord {
    /// Wraps a document in a new handle.
    pub fn new(document: Document) -> Self {
        Self { inner: Arc::new(RwLock::new(document)) }
    }

    /// Returns a copy of the current contents of the record.
    pub fn snapshot(&self) -> Document {
        self.read(Document::clone)
    }

    /// Returns a copy of a single field's current value.
    pub fn get(&self, field: &str) -> Option<Bson> {
        self.read(|document| document.get(field).cloned())
    }

    /// Sets a field on the stored record.
    pub fn set(&self, field: impl Into<String>, value: impl Into<Bson>) {
        self.modify(|document| {
            document.insert(field.into(), value.into());
        });
    }

    /// Runs `f` with shared access to the stored document.
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Applies `f` to a copy of the stored document, then writes the copy back.
    ///
    /// No lock is held while `f` runs, so `f` may call back into the store. A concurrent
    /// write to the same record between the copy and the write-back is overwritten.
    pub fn modify<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        let mut document = self.snapshot();
        let output = f(&mut document);
        self.replace(document);
        output
    }

    fn replace(&self, document: Document) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = document;
    }

    /// Decodes the current contents into a typed record.
    pub fn decode<R: Record>(&self) -> StoreResult<R> {
        R::from_document(self.snapshot())
    }

    /// Returns `true` if both handles point at the same stored record.
    pub fn ptr_eq(&self, other: &SharedRecord) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Document> for SharedRecord {
    fn from(document: Document) -> Self {
        SharedRecord::new(document)
    }
}

impl fmt::Debug for SharedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|document| f.debug_tuple("SharedRecord").field(document).finish())
    }
}

/// A [`SharedRecord`] viewed through a typed record `R`.
///
/// [`TypedRecord::get`] decodes a snapshot. [`TypedRecord::update`] decodes a snapshot,
/// applies a change and writes it back into the aliased storage. Fields present in storage
/// that `R` does not know about are left untouched.
pub struct TypedRecord<R> {
    record: SharedRecord,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> TypedRecord<R> {
    /// Views an untyped handle as a record of type `R`.
    pub fn new(record: SharedRecord) -> Self {
        Self { record, _marker: PhantomData }
    }

    /// Decodes the current contents of the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the stored document does not have the shape of `R`.
    pub fn get(&self) -> StoreResult<R> {
        self.record.decode()
    }

    /// Applies `f` to the stored record in place.
    ///
    /// The change is visible to every other handle on the same record and to later queries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the stored document cannot be decoded as `R`,
    /// or the updated value cannot be encoded. The stored record is unchanged in that case.
    pub fn update<T>(&self, f: impl FnOnce(&mut R) -> T) -> StoreResult<T> {
        let mut document = self.record.snapshot();
        let mut value = R::from_document(document.clone())?;
        let before = value.to_document()?;
        let output = f(&mut value);
        let after = value.to_document()?;

        // Drop fields the typed value stopped emitting (e.g. an Option set to None),
        // keep fields R never knew about.
        for key in before.keys() {
            if !after.contains_key(key) {
                document.remove(key);
            }
        }
        for (key, field) in after {
            document.insert(key, field);
        }

        self.record.replace(document);
        Ok(output)
    }

    /// Returns the untyped handle.
    pub fn shared(&self) -> &SharedRecord {
        &self.record
    }

    /// Consumes the typed view and returns the untyped handle.
    pub fn into_shared(self) -> SharedRecord {
        self.record
    }
}

impl<R> Clone for TypedRecord<R> {
    fn clone(&self) -> Self {
        Self { record: self.record.clone(), _marker: PhantomData }
    }
}

impl<R> fmt::Debug for TypedRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedRecord")
            .field("record", &self.record)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: i64,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    }

    impl Record for Note {
        fn collection_name() -> &'static str {
            "notes"
        }
    }

    #[test]
    fn clones_share_the_same_document() {
        let record = SharedRecord::new(doc! { "id": 1, "name": "a" });
        let alias = record.clone();

        alias.set("name", "changed");

        assert!(record.ptr_eq(&alias));
        assert_eq!(record.get("name"), Some(Bson::String("changed".into())));
    }

    #[test]
    fn typed_update_writes_through_and_keeps_unknown_fields() {
        let record = SharedRecord::new(doc! {
            "id": 7_i64,
            "body": "draft",
            "tag": "old",
            "legacy": true,
        });
        let typed = TypedRecord::<Note>::new(record.clone());

        typed
            .update(|note| {
                note.body = "final".to_string();
                note.tag = None;
            })
            .unwrap();

        let stored = record.snapshot();
        assert_eq!(stored.get_str("body").unwrap(), "final");
        assert!(stored.get("tag").is_none());
        assert_eq!(stored.get_bool("legacy").unwrap(), true);
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let record = SharedRecord::new(doc! { "id": "not-a-number" });

        let err = record.decode::<Note>().unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn record_ext_round_trips_through_json() {
        let note = Note { id: 3, body: "hello".into(), tag: None };

        let value = note.to_json().unwrap();

        assert_eq!(value, serde_json::json!({ "id": 3, "body": "hello" }));
        assert_eq!(Note::from_json(value).unwrap(), note);
    }
}
