//! Upload intake pipeline
//!
//! Orchestrates what happens when the upload transport hands over a file:
//! derive identity and storage key, classify the filename, store the bytes,
//! extract and normalize embedded metadata, persist the record.

use std::collections::HashMap;
use std::sync::Arc;

use docstack_core::metadata::{normalize, MetadataField, MetadataMapping, MetadataValue};
use docstack_core::models::{DetailedDocument, Document, DocumentEntity};
use docstack_core::naming::StorageLayout;
use docstack_core::validation::{sanitize_filename_with_limit, DEFAULT_MAX_FILENAME_LENGTH};
use docstack_core::AppError;
use docstack_store::{BlobStore, DocumentStore};
use uuid::Uuid;

use crate::extract::MetadataExtractor;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file handed over by the upload-transport collaborator.
pub struct UploadRequest {
    pub original_filename: String,
    pub data: Vec<u8>,
    pub uploaded_by: Option<Uuid>,
}

/// Document intake service: the complete `save_file` workflow.
pub struct DocumentIntake {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    extractor: Option<Arc<dyn MetadataExtractor>>,
    mapping: MetadataMapping,
    layout: StorageLayout,
    max_filename_length: usize,
}

impl DocumentIntake {
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            documents,
            blobs,
            extractor: None,
            mapping: MetadataMapping::default(),
            layout: StorageLayout::default(),
            max_filename_length: DEFAULT_MAX_FILENAME_LENGTH,
        }
    }

    /// Attach a metadata-extraction engine.
    pub fn with_extractor(mut self, extractor: Arc<dyn MetadataExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Override the field-to-extractor-key mapping.
    pub fn with_mapping(mut self, mapping: MetadataMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Override the storage layout (path prefix).
    pub fn with_layout(mut self, layout: StorageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Take the storage layout and filename limit from a
    /// [`CoreConfig`](docstack_core::CoreConfig).
    pub fn with_config(mut self, config: &docstack_core::CoreConfig) -> Self {
        self.max_filename_length = config.max_filename_length;
        let layout = config.layout();
        self.with_layout(layout)
    }

    /// Complete intake workflow: validate → derive → classify → extract →
    /// store blob → persist record.
    pub async fn save_file(&self, request: UploadRequest) -> Result<DetailedDocument, AppError> {
        let original_filename =
            sanitize_filename_with_limit(&request.original_filename, self.max_filename_length)?;

        let base = Document::from_upload_with_layout(&original_filename, &self.layout);
        let mut document = DetailedDocument::new(base);
        document.uploaded_by = request.uploaded_by;

        tracing::info!(
            document_id = %document.id(),
            original_filename = %original_filename,
            mime_type = %document.mime_type(),
            size_bytes = request.data.len(),
            "Processing document upload"
        );

        if let Some(extractor) = &self.extractor {
            let raw = extractor
                .extract(&request.data, document.mime_type())
                .await?;
            apply_metadata(&mut document, &raw, &self.mapping);
            document.plaintext = extractor
                .extract_plaintext(&request.data, document.mime_type())
                .await?;
        }

        let content_type = if document.mime_type().is_empty() {
            FALLBACK_CONTENT_TYPE
        } else {
            document.mime_type()
        };

        self.blobs
            .put(document.storage_key(), content_type, request.data)
            .await
            .map_err(AppError::from)?;

        let stored = self.documents.create(document).await.map_err(AppError::from)?;

        Ok(stored)
    }

    /// Fetch a stored document.
    pub async fn get(&self, id: Uuid) -> Result<Option<DetailedDocument>, AppError> {
        self.documents.get(id).await.map_err(AppError::from)
    }

    /// Fetch the stored bytes for a document.
    pub async fn open(&self, document: &DetailedDocument) -> Result<Vec<u8>, AppError> {
        self.blobs
            .get(document.storage_key())
            .await
            .map_err(AppError::from)
    }
}

/// Walk the mapping, normalize each raw value present, and set the matching
/// record field. Values that resist normalization survive as raw text; the
/// extractor's MIME type only fills the gap when classification found none.
pub fn apply_metadata(
    document: &mut DetailedDocument,
    raw: &HashMap<String, String>,
    mapping: &MetadataMapping,
) {
    for (field, source_key) in mapping.iter() {
        let Some(value) = raw.get(source_key) else {
            continue;
        };
        match (field, normalize(field, value)) {
            (MetadataField::Title, MetadataValue::Text(title)) => document.title = title,
            (MetadataField::Author, MetadataValue::Text(author)) => document.author = author,
            (MetadataField::MimeType, MetadataValue::Text(mime)) => {
                if document.base.mime_type.is_empty() {
                    document.base.mime_type = mime;
                }
            }
            (MetadataField::DateCreated, MetadataValue::Timestamp(ts)) => {
                document.content_created_at = Some(ts);
                document.content_created_raw = None;
            }
            (MetadataField::DateCreated, MetadataValue::Text(rawdate)) => {
                document.content_created_at = None;
                document.content_created_raw = Some(rawdate);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstack_core::models::Document;

    fn raw_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_apply_metadata_normalizes_title_and_date() {
        let mut doc = DetailedDocument::new(Document::from_upload("r.pdf"));
        let raw = raw_map(&[
            ("title", "ANNUAL REPORT"),
            ("creator", "Finance Dept"),
            ("creation date", "2008-11-03T10:00:00Z"),
        ]);

        apply_metadata(&mut doc, &raw, &MetadataMapping::default());

        assert_eq!(doc.title, "Annual Report");
        assert_eq!(doc.author, "Finance Dept");
        assert!(doc.content_created_at.is_some());
        assert!(doc.content_created_raw.is_none());
    }

    #[test]
    fn test_apply_metadata_keeps_unparseable_date_as_raw() {
        let mut doc = DetailedDocument::new(Document::from_upload("r.pdf"));
        let raw = raw_map(&[("creation date", "circa 1999")]);

        apply_metadata(&mut doc, &raw, &MetadataMapping::default());

        assert!(doc.content_created_at.is_none());
        assert_eq!(doc.content_created_raw.as_deref(), Some("circa 1999"));
    }

    #[test]
    fn test_apply_metadata_mime_fills_gap_only() {
        let mut doc = DetailedDocument::new(Document::from_upload("r.pdf"));
        let classified = doc.base.mime_type.clone();
        let raw = raw_map(&[("mimetype", "application/x-other")]);

        apply_metadata(&mut doc, &raw, &MetadataMapping::default());
        assert_eq!(doc.base.mime_type, classified);

        let mut bare = DetailedDocument::new(Document::from_upload("noext"));
        apply_metadata(&mut bare, &raw, &MetadataMapping::default());
        assert_eq!(bare.base.mime_type, "application/x-other");
    }

    #[test]
    fn test_apply_metadata_missing_keys_leave_fields_alone() {
        let mut doc = DetailedDocument::new(Document::from_upload("r.pdf"));
        doc.title = "Existing".to_string();

        apply_metadata(&mut doc, &HashMap::new(), &MetadataMapping::default());
        assert_eq!(doc.title, "Existing");
    }

    #[test]
    fn test_apply_metadata_unparseable_date_clears_stale_parse() {
        let mut doc = DetailedDocument::new(Document::from_upload("r.pdf"));

        apply_metadata(
            &mut doc,
            &raw_map(&[("creation date", "2008-11-03T10:00:00Z")]),
            &MetadataMapping::default(),
        );
        assert!(doc.content_created_at.is_some());

        // A later pass with a value that resists parsing must not leave the
        // old parse and the new raw string disagreeing.
        apply_metadata(
            &mut doc,
            &raw_map(&[("creation date", "circa 1999")]),
            &MetadataMapping::default(),
        );
        assert!(doc.content_created_at.is_none());
        assert_eq!(doc.content_created_raw.as_deref(), Some("circa 1999"));
    }

    #[tokio::test]
    async fn test_with_config_applies_prefix_and_filename_limit() {
        use docstack_core::models::DocumentEntity;
        use docstack_core::{AppError, CoreConfig};
        use docstack_store::{MemoryBlobStore, MemoryDocumentStore};

        let config = CoreConfig {
            storage_prefix: "archive".to_string(),
            max_filename_length: 10,
            ..Default::default()
        };
        let intake = DocumentIntake::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
        .with_config(&config);

        let stored = intake
            .save_file(UploadRequest {
                original_filename: "short.pdf".to_string(),
                data: b"x".to_vec(),
                uploaded_by: None,
            })
            .await
            .unwrap();
        assert_eq!(stored.storage_key(), format!("archive/{}.pdf", stored.id()));

        let result = intake
            .save_file(UploadRequest {
                original_filename: "quarterly-report.pdf".to_string(),
                data: b"x".to_vec(),
                uploaded_by: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
