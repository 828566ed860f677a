//! Built-in seed data: the demo catalog and the demo user.

use bson::Document;

use shelfkeep_core::record::{Record, RecordExt};
use shelfkeep_identity::{
    credential::CredentialHasher,
    user::{SecurityQuestion, User},
};

use crate::{book::Book, error::BookstoreResult};

pub const DEMO_USER_EMAIL: &str = "test@example.com";
pub const DEMO_USER_PASSWORD: &str = "password123";

pub fn default_books() -> Vec<Book> {
    vec![
        Book::new(1, "The Pragmatic Programmer").with_author("Andrew Hunt & David Thomas"),
        Book::new(2, "Clean Code").with_author("Robert C. Martin"),
        Book::new(3, "You Don't Know JS").with_author("Kyle Simpson"),
        Book::new(4, "Design Patterns").with_author("Erich Gamma"),
        Book::new(5, "Refactoring").with_author("Martin Fowler"),
    ]
}

/// The demo user, with its password hashed by `hasher`.
pub fn default_users(hasher: &CredentialHasher) -> BookstoreResult<Vec<User>> {
    Ok(vec![User {
        email: DEMO_USER_EMAIL.to_string(),
        password: hasher.hash(DEMO_USER_PASSWORD)?,
        security_questions: vec![
            SecurityQuestion::new("What is your favorite color?", "Blue"),
            SecurityQuestion::new("What city were you born in?", "Omaha"),
        ],
    }])
}

/// Seed records grouped by collection, in insertion order.
pub fn seed_documents(hasher: &CredentialHasher) -> BookstoreResult<Vec<(&'static str, Vec<Document>)>> {
    Ok(vec![
        (Book::collection_name(), to_documents(&default_books())?),
        (User::collection_name(), to_documents(&default_users(hasher)?)?),
    ])
}

fn to_documents<R: Record>(records: &[R]) -> BookstoreResult<Vec<Document>> {
    Ok(records
        .iter()
        .map(RecordExt::to_document)
        .collect::<Result<Vec<_>, _>>()?)
}
