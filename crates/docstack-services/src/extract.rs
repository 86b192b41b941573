//! Metadata-extraction collaborator contract
//!
//! Reading embedded document properties (PDF info dictionary, office file
//! metadata) is the job of an external engine. The intake pipeline only
//! needs a raw key/value map back; normalization and field mapping happen
//! in docstack-core.

use std::collections::HashMap;

use async_trait::async_trait;
use docstack_core::AppError;

/// Extracts raw metadata and plaintext from stored file bytes.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Return raw metadata as extractor-key to raw-string-value pairs.
    /// Unknown or absent properties are simply omitted.
    async fn extract(&self, data: &[u8], mime_type: &str) -> Result<HashMap<String, String>, AppError>;

    /// Return extracted plaintext for full-text indexing, empty when the
    /// format is not text-bearing.
    async fn extract_plaintext(&self, _data: &[u8], _mime_type: &str) -> Result<String, AppError> {
        Ok(String::new())
    }
}

/// No-op implementation for embeddings without an extraction engine.
pub struct NoOpMetadataExtractor;

#[async_trait]
impl MetadataExtractor for NoOpMetadataExtractor {
    async fn extract(
        &self,
        _data: &[u8],
        _mime_type: &str,
    ) -> Result<HashMap<String, String>, AppError> {
        Ok(HashMap::new())
    }
}
