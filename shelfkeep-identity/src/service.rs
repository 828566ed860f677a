//! Login and identity-recovery workflows over the user collection.

use serde_json::Value;
use tracing::{debug, trace};

use shelfkeep_core::{
    backend::RecordBackend,
    collection::TypedCollection,
    predicate::Predicate,
    record::TypedRecord,
    store::RecordStore,
};

use crate::{
    answers::{parse_answers, verify_security_answers},
    credential::CredentialHasher,
    error::{IdentityError, IdentityResult},
    user::{SecurityQuestion, User},
};

/// Runs credential and security-question checks against the `users` collection.
///
/// Every method is a single-request check: nothing is remembered between calls.
#[derive(Debug)]
pub struct IdentityService<'a, B: RecordBackend> {
    users: TypedCollection<'a, B, User>,
    hasher: &'a CredentialHasher,
}

impl<'a, B: RecordBackend> IdentityService<'a, B> {
    pub fn new(store: &'a RecordStore<B>, hasher: &'a CredentialHasher) -> Self {
        Self {
            users: store.typed_collection::<User>(),
            hasher,
        }
    }

    /// Hashes `password` and appends a new user.
    ///
    /// No uniqueness check is made; registering an email twice leaves two users and
    /// lookups keep resolving to the first.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MissingCredentials`] if `email` or `password` is empty.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        security_questions: Vec<SecurityQuestion>,
    ) -> IdentityResult<()> {
        if email.is_empty() || password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let user = User {
            email: email.to_string(),
            password: self.hasher.hash(password)?,
            security_questions,
        };
        self.users.insert_one(&user)?;

        trace!(email, "registered user");
        Ok(())
    }

    /// Returns a handle to the first user with the given email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Store`] wrapping `NotFound` if no user has that email.
    pub async fn find_user(&self, email: &str) -> IdentityResult<TypedRecord<User>> {
        Ok(self.users
            .find_one(&Predicate::field("email", email))
            .await?)
    }

    /// Checks `password` against the stored digest of the user with `email`.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::MissingCredentials`] if either input is empty
    /// - [`IdentityError::Store`] wrapping `NotFound` if the user does not exist
    /// - [`IdentityError::InvalidCredentials`] if the password does not verify
    pub async fn login(&self, email: &str, password: &str) -> IdentityResult<TypedRecord<User>> {
        if email.is_empty() || password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let record = self.find_user(email).await?;
        let user = record.get()?;

        if !self.hasher.verify(password, &user.password) {
            debug!(email, "password did not verify");
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(record)
    }

    /// Checks a raw security-question submission for the user with `email`.
    ///
    /// The submission's shape is validated before the user is looked up, so a malformed
    /// submission is reported as such even for an unknown email.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::MalformedAnswers`] if the submission has the wrong shape
    /// - [`IdentityError::Store`] wrapping `NotFound` if the user does not exist
    /// - [`IdentityError::AnswersMismatch`] if any answer differs from the stored one at its position
    pub async fn verify_security_questions(&self, email: &str, submission: &Value) -> IdentityResult<()> {
        let answers = parse_answers(submission).ok_or(IdentityError::MalformedAnswers)?;
        let user = self.find_user(email).await?.get()?;

        if !verify_security_answers(&user.security_questions, &answers) {
            debug!(email, submitted = answers.len(), "security answers did not match");
            return Err(IdentityError::AnswersMismatch);
        }

        Ok(())
    }

    /// Replaces the stored digest of the user with `email` by a digest of `new_password`.
    ///
    /// The stored user record is changed in place.
    pub async fn change_password(&self, email: &str, new_password: &str) -> IdentityResult<()> {
        if new_password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let record = self.find_user(email).await?;
        let digest = self.hasher.hash(new_password)?;
        record.update(|user| user.password = digest)?;

        trace!(email, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;
    use shelfkeep_core::error::StoreError;
    use shelfkeep_memory::InMemoryStore;

    use crate::credential::tests::fast_hasher;

    fn questions() -> Vec<SecurityQuestion> {
        vec![
            SecurityQuestion::new("What is your favorite color?", "Blue"),
            SecurityQuestion::new("What city were you born in?", "Omaha"),
        ]
    }

    fn store_with_user(hasher: &CredentialHasher) -> RecordStore<InMemoryStore> {
        let store = RecordStore::new(InMemoryStore::new());
        IdentityService::new(&store, hasher)
            .register("test@example.com", "password123", questions())
            .unwrap();
        store
    }

    #[tokio::test]
    async fn register_stores_a_digest_not_the_plaintext() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);

        let stored = store
            .collection("users")
            .find_one(&Predicate::field("email", "test@example.com"))
            .await
            .unwrap()
            .snapshot();

        let password = stored.get_str("password").unwrap();
        assert_ne!(password, "password123");
        assert!(hasher.verify("password123", password));
        assert_eq!(stored.get_array("securityQuestions").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);
        let identity = IdentityService::new(&store, &hasher);

        let user = identity.login("test@example.com", "password123").await.unwrap();

        assert_eq!(user.get().unwrap().email, "test@example.com");
    }

    #[tokio::test]
    async fn login_distinguishes_failure_kinds() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);
        let identity = IdentityService::new(&store, &hasher);

        let wrong = identity.login("test@example.com", "nope").await.unwrap_err();
        assert!(matches!(wrong, IdentityError::InvalidCredentials));

        let unknown = identity.login("ghost@example.com", "password123").await.unwrap_err();
        assert!(unknown.is_not_found());

        let missing = identity.login("", "password123").await.unwrap_err();
        assert!(matches!(missing, IdentityError::MissingCredentials));
    }

    #[tokio::test]
    async fn login_with_corrupt_digest_is_invalid_credentials() {
        let hasher = fast_hasher();
        let store = RecordStore::new(InMemoryStore::new());
        store.collection("users").insert_one(doc! {
            "email": "legacy@example.com",
            "password": "plaintext-by-mistake",
            "securityQuestions": [],
        });
        let identity = IdentityService::new(&store, &hasher);

        let err = identity.login("legacy@example.com", "plaintext-by-mistake").await.unwrap_err();

        assert!(matches!(err, IdentityError::InvalidCredentials));
    }

    #[tokio::test]
    async fn verify_security_questions_outcomes() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);
        let identity = IdentityService::new(&store, &hasher);
        let email = "test@example.com";

        identity
            .verify_security_questions(email, &json!([{ "answer": "Blue" }, { "answer": "Omaha" }]))
            .await
            .unwrap();

        let mismatch = identity
            .verify_security_questions(email, &json!([{ "answer": "Blue" }, { "answer": "Wrong" }]))
            .await
            .unwrap_err();
        assert!(matches!(mismatch, IdentityError::AnswersMismatch));

        let too_many = identity
            .verify_security_questions(email, &json!([{ "answer": "Blue" }, { "answer": "Omaha" }, { "answer": "Omaha" }]))
            .await
            .unwrap_err();
        assert!(matches!(too_many, IdentityError::AnswersMismatch));

        identity
            .verify_security_questions(email, &json!([]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn shape_is_checked_before_user_lookup() {
        let hasher = fast_hasher();
        let store = RecordStore::new(InMemoryStore::new());
        let identity = IdentityService::new(&store, &hasher);

        let malformed = identity
            .verify_security_questions("ghost@example.com", &json!([{ "wrongKey": "x" }]))
            .await
            .unwrap_err();
        assert!(matches!(malformed, IdentityError::MalformedAnswers));

        let unknown = identity
            .verify_security_questions("ghost@example.com", &json!([{ "answer": "Blue" }]))
            .await
            .unwrap_err();
        assert!(matches!(unknown, IdentityError::Store(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn duplicate_registration_resolves_to_first_user() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);
        let identity = IdentityService::new(&store, &hasher);

        identity
            .register("test@example.com", "second-password", vec![])
            .unwrap();

        assert_eq!(store.collection("users").find(None).await.len(), 2);
        assert!(identity.login("test@example.com", "password123").await.is_ok());
        assert!(identity.login("test@example.com", "second-password").await.is_err());
    }

    #[tokio::test]
    async fn change_password_mutates_the_stored_user() {
        let hasher = fast_hasher();
        let store = store_with_user(&hasher);
        let identity = IdentityService::new(&store, &hasher);

        identity.change_password("test@example.com", "new-secret").await.unwrap();

        assert!(identity.login("test@example.com", "new-secret").await.is_ok());
        assert!(matches!(
            identity.login("test@example.com", "password123").await.unwrap_err(),
            IdentityError::InvalidCredentials
        ));
        assert_eq!(store.collection("users").find(None).await.len(), 1);
    }
}
