//! In-memory record storage backend for shelfkeep.
//!
//! This crate provides an in-memory implementation of the `RecordBackend` trait. Collections
//! are ordered vectors of shared record handles, so records returned by a lookup alias the
//! stored ones. It is meant for development, tests and the seeded demo store.
//!
//! # Features
//!
//! - **Insertion order** - `find` returns records in the order they were inserted
//! - **First-match semantics** - `find_one` and `delete_one` act on the earliest match
//! - **Aliasing handles** - mutations through a returned record are seen by later lookups
//!
//! # Quick Start
//!
//! ```ignore
//! use shelfkeep::{prelude::*, memory::InMemoryStore};
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
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let store = RecordStore::new(backend);
//!     let books = store.typed_collection::<Book>();
//!
//!     books.insert_one(&Book { id: 1, title: "Clean Code".to_string() })?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as shelfkeep_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
