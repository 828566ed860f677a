//! One-way password hashing and verification.
//!
//! Digests are Argon2id PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`). Each
//! call to [`CredentialHasher::hash`] draws a fresh random salt, so hashing the same secret
//! twice yields two different digests that both verify. Verification reads the cost
//! parameters from the digest itself, so digests made under an older configuration keep
//! verifying after the configuration changes.

use argon2::{
    password_hash::{
        rand_core::OsRng,
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString
    },
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{IdentityError, IdentityResult};

/// Argon2 cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes and verifies secrets with Argon2id.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Creates a hasher using the given cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidHashingConfig`] if Argon2 rejects the parameters
    /// (for example a memory cost below `8 * parallelism` KiB).
    pub fn new(config: &HashingConfig) -> IdentityResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| IdentityError::InvalidHashingConfig(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Produces a salted digest of `plaintext`.
    pub fn hash(&self, plaintext: &str) -> IdentityResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?
            .to_string();

        Ok(digest)
    }

    /// Returns `true` iff `digest` was produced from `plaintext`.
    ///
    /// The final comparison runs in constant time. A digest that does not parse as a PHC
    /// string verifies as `false`.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "stored digest is not a valid PHC string");
                return false;
            }
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { argon2: Argon2::default() }
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}
