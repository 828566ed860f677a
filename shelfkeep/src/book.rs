//! The book record.

use serde::{Deserialize, Serialize};

use shelfkeep_core::record::Record;

/// A book in the catalog.
///
/// `id` is the conventional lookup key; the store does not keep it unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), author: None }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl Record for Book {
    fn collection_name() -> &'static str {
        "books"
    }
}

/// Replacement values applied to an existing book by
/// [`BookCatalog::update`](crate::catalog::BookCatalog::update).
///
/// Both fields are replaced: an absent `author` clears the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookChanges {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}
