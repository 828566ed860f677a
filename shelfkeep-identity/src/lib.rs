//! Identity verification for shelfkeep: password digests and security-question recovery.
//!
//! - **Credentials** ([`credential`]) - Argon2id hashing and constant-time verification
//! - **Answers** ([`answers`]) - Shape validation and positional matching of security answers
//! - **Users** ([`user`]) - The stored user record
//! - **Service** ([`service`]) - Login, registration and recovery workflows over a record store
//! - **Errors** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use shelfkeep_identity::{credential::{CredentialHasher, HashingConfig}, service::IdentityService};
//!
//! let hasher = CredentialHasher::new(&HashingConfig::default())?;
//! let identity = IdentityService::new(&store, &hasher);
//!
//! identity.login("test@example.com", "password123").await?;
//! identity
//!     .verify_security_questions("test@example.com", &serde_json::json!([{ "answer": "Blue" }]))
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as shelfkeep_identity;

pub mod answers;
pub mod credential;
pub mod error;
pub mod service;
pub mod user;

pub use answers::{SecurityAnswer, parse_answers, validate_answer_shape, verify_security_answers};
pub use credential::{CredentialHasher, HashingConfig};
pub use error::{IdentityError, IdentityResult};
pub use service::IdentityService;
pub use user::{SecurityQuestion, User};
