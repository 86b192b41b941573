//! Configuration module
//!
//! Settings for the document core. Everything has a sensible default so the
//! crate is usable without any environment; `from_env` lets an embedding
//! application override the defaults.

use std::env;

use crate::models::DEFAULT_FALLBACK_BASENAME;
use crate::naming::STORAGE_PREFIX;
use crate::validation::DEFAULT_MAX_FILENAME_LENGTH;

/// Core configuration shared by the intake and ledger services
#[derive(Clone, Debug)]
pub struct CoreConfig {
    /// Path prefix under which document blobs are stored
    pub storage_prefix: String,
    /// Basename used for friendly filenames when no slug is available
    pub fallback_basename: String,
    /// Maximum accepted length for an original filename
    pub max_filename_length: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_prefix: STORAGE_PREFIX.to_string(),
            fallback_basename: DEFAULT_FALLBACK_BASENAME.to_string(),
            max_filename_length: DEFAULT_MAX_FILENAME_LENGTH,
        }
    }
}

impl CoreConfig {
    /// Storage layout under this configuration's prefix.
    pub fn layout(&self) -> crate::naming::StorageLayout {
        crate::naming::StorageLayout::new(self.storage_prefix.clone())
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage_prefix: env::var("DOCSTACK_STORAGE_PREFIX")
                .unwrap_or(defaults.storage_prefix),
            fallback_basename: env::var("DOCSTACK_FALLBACK_BASENAME")
                .unwrap_or(defaults.fallback_basename),
            max_filename_length: env::var("DOCSTACK_MAX_FILENAME_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_filename_length),
        }
    }
}
