//! Record store abstraction for the shelfkeep bookstore service.
//!
//! This crate is the core of the shelfkeep project and provides:
//!
//! - **Records** ([`record`]) - Typed record traits and the [`SharedRecord`](record::SharedRecord) aliasing handle
//! - **Predicates** ([`predicate`]) - Partial records used for exact per-field matching
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Collections interface** ([`collection`]) - Per-collection find, insert and delete
//! - **Record store** ([`store`]) - Owns a backend and hands out collections
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use shelfkeep_core::{predicate::Predicate, record::Record, store::RecordStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Book {
//!     pub id: i64,
//!     pub title: String,
//! }
//!
//! impl Record for Book {
//!     fn collection_name() -> &'static str {
//!         "books"
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as shelfkeep_core;

pub mod backend;
pub mod collection;
pub mod error;
pub mod predicate;
pub mod record;
pub mod store;
