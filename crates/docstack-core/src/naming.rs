//! Storage-key derivation
//!
//! Blobs are named after the document's identifier, never after the
//! user-supplied filename: the stem of the original name is discarded
//! entirely and only its extension survives. Two documents can therefore
//! never collide on a key, and a hostile filename can never steer the key
//! outside the storage prefix.

use uuid::Uuid;

use crate::classify::split_extension;

/// Default path prefix for document blobs.
pub const STORAGE_PREFIX: &str = "documents";

/// Derive the storage key for a document under the default layout.
///
/// The result has the form `documents/<id><extension>`; a filename without
/// an extension yields a bare `documents/<id>`.
pub fn derive_storage_key(id: Uuid, original_filename: &str) -> String {
    StorageLayout::default().key_for(id, original_filename)
}

/// Storage layout with a configurable path prefix.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    prefix: String,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            prefix: STORAGE_PREFIX.to_string(),
        }
    }
}

impl StorageLayout {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the key for a document id and original filename. Only the
    /// extension of the filename is used; the stem is discarded.
    pub fn key_for(&self, id: Uuid, original_filename: &str) -> String {
        let (_, extension) = split_extension(original_filename);
        format!("{}/{}{}", self.prefix, id, extension)
    }
}
