//! Bookstore configuration.
//!
//! Configuration is plain JSON; every field is optional and falls back to its default.
//!
//! ```json
//! {
//!     "log_level": "debug",
//!     "seed": true,
//!     "hashing": { "memory_kib": 19456, "iterations": 2, "parallelism": 1 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use shelfkeep_identity::credential::HashingConfig;

use crate::error::BookstoreResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookstoreConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Whether to load the built-in books and demo user at startup.
    pub seed: bool,
    /// Argon2 cost parameters for new password digests.
    pub hashing: HashingConfig,
}

impl Default for BookstoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: true,
            hashing: HashingConfig::default(),
        }
    }
}

impl BookstoreConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(raw: &str) -> BookstoreResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> BookstoreResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
