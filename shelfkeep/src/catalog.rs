//! Book catalog operations over the `books` collection.
//!
//! Updates do not go through insert or delete: the catalog looks the book up and changes
//! the returned record in place, relying on lookups handing back aliases into the store.

use tracing::trace;

use shelfkeep_core::{
    backend::RecordBackend,
    collection::TypedCollection,
    predicate::Predicate,
    record::TypedRecord,
    store::RecordStore,
};

use crate::{
    book::{Book, BookChanges},
    error::{CatalogError, CatalogResult},
};

/// CRUD operations on books.
#[derive(Debug)]
pub struct BookCatalog<'a, B: RecordBackend> {
    books: TypedCollection<'a, B, Book>,
}

impl<'a, B: RecordBackend> BookCatalog<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { books: store.typed_collection::<Book>() }
    }

    /// Returns every book in insertion order.
    pub async fn list(&self) -> CatalogResult<Vec<Book>> {
        Ok(self.books.load(None).await?)
    }

    /// Returns a handle to the first book with `id`.
    pub async fn find(&self, id: i64) -> CatalogResult<TypedRecord<Book>> {
        Ok(self.books
            .find_one(&Predicate::field("id", id))
            .await?)
    }

    /// Returns a copy of the first book with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] wrapping `NotFound` if no book has that id.
    pub async fn get(&self, id: i64) -> CatalogResult<Book> {
        Ok(self.find(id).await?.get()?)
    }

    /// Appends a book to the catalog.
    ///
    /// An existing book with the same id is not replaced; both are kept and lookups
    /// resolve to the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingTitle`] if the title is empty or only whitespace.
    pub fn add(&self, book: Book) -> CatalogResult<()> {
        if book.title.trim().is_empty() {
            return Err(CatalogError::MissingTitle);
        }

        self.books.insert_one(&book)?;
        trace!(id = book.id, "book added");
        Ok(())
    }

    /// Replaces the title and author of the first book with `id`, in place.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingTitle`] if the new title is empty or only whitespace
    /// - [`CatalogError::Store`] wrapping `NotFound` if no book has that id
    pub async fn update(&self, id: i64, changes: BookChanges) -> CatalogResult<()> {
        if changes.title.trim().is_empty() {
            return Err(CatalogError::MissingTitle);
        }

        let record = self.find(id).await?;
        record.update(|book| {
            book.title = changes.title;
            book.author = changes.author;
        })?;

        trace!(id, "book updated");
        Ok(())
    }

    /// Removes the first book with `id`; does nothing if there is none.
    pub fn remove(&self, id: i64) {
        self.books.delete_one(&Predicate::field("id", id));
    }
}
