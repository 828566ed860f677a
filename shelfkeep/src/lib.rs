//! Main shelfkeep crate: the record store and identity checks behind a small bookstore API.
//!
//! This crate is the entry point for users of shelfkeep. It re-exports the record store
//! crates and wires them into a [`Bookstore`]: one seeded in-memory store plus the
//! [`BookCatalog`](catalog::BookCatalog) and
//! [`IdentityService`](shelfkeep_identity::service::IdentityService) built on it.
//!
//! # Quick Start
//!
//! ```ignore
//! use shelfkeep::{prelude::*, Bookstore, config::BookstoreConfig, telemetry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BookstoreConfig::default();
//!     telemetry::init_tracing(&config.log_level);
//!
//!     let bookstore = Bookstore::open(&config).await?;
//!
//!     // Books
//!     let books = bookstore.catalog().list().await?;
//!     println!("{} books", books.len());
//!
//!     // Login
//!     bookstore.identity().login("test@example.com", "password123").await?;
//!
//!     // Identity recovery
//!     bookstore
//!         .identity()
//!         .verify_security_questions(
//!             "test@example.com",
//!             &serde_json::json!([{ "answer": "Blue" }, { "answer": "Omaha" }]),
//!         )
//!         .await?;
//!
//!     bookstore.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Records and aliasing
//!
//! Lookups return handles into the store rather than copies. Changing a record through a
//! handle changes what every later lookup sees; the catalog's `update` and the identity
//! service's `change_password` work this way.

pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod prelude;
pub mod seed;
pub mod telemetry;

use tracing::info;

use shelfkeep_core::backend::{RecordBackend, RecordBackendBuilder};

pub use shelfkeep_core::{backend, collection, predicate, record, store};

pub use shelfkeep_identity as identity;

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use shelfkeep_memory::{InMemoryStore, InMemoryStoreBuilder};
}

use crate::{
    catalog::BookCatalog,
    config::BookstoreConfig,
    error::BookstoreResult,
    memory::InMemoryStore,
    store::RecordStore,
};
use shelfkeep_identity::{credential::CredentialHasher, service::IdentityService};

/// A record store together with the hasher used for its users.
///
/// The bookstore owns its store; services borrow it. Build one per process, or one per
/// test for isolation.
#[derive(Debug)]
pub struct Bookstore<B: RecordBackend = InMemoryStore> {
    store: RecordStore<B>,
    hasher: CredentialHasher,
}

impl Bookstore<InMemoryStore> {
    /// Builds an in-memory bookstore from `config`, loading seed data if enabled.
    ///
    /// # Errors
    ///
    /// Fails if the hashing parameters are invalid or the seed records cannot be encoded.
    pub async fn open(config: &BookstoreConfig) -> BookstoreResult<Self> {
        let hasher = CredentialHasher::new(&config.hashing)?;

        let mut builder = InMemoryStore::builder();
        if config.seed {
            for (collection, records) in seed::seed_documents(&hasher)? {
                builder = builder.seed(collection, records);
            }
        }
        let backend = builder.build().await?;

        info!(seeded = config.seed, "bookstore opened");

        Ok(Self::with_store(RecordStore::new(backend), hasher))
    }
}

impl<B: RecordBackend> Bookstore<B> {
    /// Wraps an existing store.
    pub fn with_store(store: RecordStore<B>, hasher: CredentialHasher) -> Self {
        Self { store, hasher }
    }

    pub fn catalog(&self) -> BookCatalog<'_, B> {
        BookCatalog::new(&self.store)
    }

    pub fn identity(&self) -> IdentityService<'_, B> {
        IdentityService::new(&self.store, &self.hasher)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Shuts down the underlying store.
    pub async fn shutdown(self) -> BookstoreResult<()> {
        self.store.shutdown().await?;
        info!("bookstore shut down");
        Ok(())
    }
}
