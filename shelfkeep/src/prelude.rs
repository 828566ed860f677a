//! Convenient re-exports of commonly used types from shelfkeep.
//!
//! ```ignore
//! use shelfkeep::prelude::*;
//! ```

pub use shelfkeep_core::{
    backend::{RecordBackend, RecordBackendBuilder},
    collection::{Collection, TypedCollection},
    error::{StoreError, StoreResult},
    predicate::Predicate,
    record::{Record, RecordExt, SharedRecord, TypedRecord},
    store::RecordStore,
};

pub use shelfkeep_identity::{
    answers::{SecurityAnswer, parse_answers, validate_answer_shape, verify_security_answers},
    credential::{CredentialHasher, HashingConfig},
    error::{IdentityError, IdentityResult},
    service::IdentityService,
    user::{SecurityQuestion, User},
};

pub use crate::{
    book::{Book, BookChanges},
    catalog::BookCatalog,
    error::{BookstoreError, BookstoreResult, CatalogError, CatalogResult},
};
