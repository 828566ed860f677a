//! Error types for the bookstore facade.

use thiserror::Error;

pub use shelfkeep_core::error::{StoreError, StoreResult};
pub use shelfkeep_identity::error::{IdentityError, IdentityResult};

/// Errors raised by [`BookCatalog`](crate::catalog::BookCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A book must have a non-empty title.
    #[error("Book title is required")]
    MissingTitle,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Returns `true` if the book the request referred to does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Store(err) if err.is_not_found())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Top-level error for opening and configuring a [`Bookstore`](crate::Bookstore).
#[derive(Error, Debug)]
pub enum BookstoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BookstoreResult<T> = Result<T, BookstoreError>;
