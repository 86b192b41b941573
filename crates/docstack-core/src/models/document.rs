use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::classify;
use crate::naming::StorageLayout;

/// Basename used for friendly filenames when nothing better is known.
pub const DEFAULT_FALLBACK_BASENAME: &str = "untitled";

/// Capability interface shared by every document variant.
///
/// Richer variants compose a [`Document`] rather than inheriting from it;
/// this trait is the common surface collaborators program against.
pub trait DocumentEntity {
    fn id(&self) -> Uuid;
    fn storage_key(&self) -> &str;
    fn mime_type(&self) -> &str;
    fn file_extension(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// A friendly filename (not the id) for the user to see on download.
    /// Purely presentational; never persisted and never derived from the id.
    fn friendly_filename(&self) -> String {
        self.friendly_filename_or(DEFAULT_FALLBACK_BASENAME)
    }

    /// Friendly filename with a configurable fallback basename (see
    /// `CoreConfig::fallback_basename`).
    fn friendly_filename_or(&self, fallback_basename: &str) -> String {
        format!("{}{}", fallback_basename, self.file_extension())
    }
}

/// Minimum fields for a document entry.
///
/// The id is assigned once at construction from a 128-bit random space and
/// is never derived from user input; the storage key is built from it plus
/// the original filename's extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub storage_key: String,
    /// Empty when the extension is unknown to the MIME table.
    pub mime_type: String,
    /// Includes the leading dot; empty when the filename had none.
    pub file_extension: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a fresh record for an uploaded file. Classification happens
    /// here because the storage key and the metadata fields both need the
    /// original filename.
    pub fn from_upload(original_filename: &str) -> Self {
        Self::from_upload_with_layout(original_filename, &StorageLayout::default())
    }

    pub fn from_upload_with_layout(original_filename: &str, layout: &StorageLayout) -> Self {
        let id = Uuid::new_v4();
        let (mime_type, file_extension) = classify(original_filename);
        let now = Utc::now();
        Self {
            id,
            storage_key: layout.key_for(id, original_filename),
            mime_type,
            file_extension,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the update timestamp. The persistence collaborator calls
    /// this before every write.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl DocumentEntity for Document {
    fn id(&self) -> Uuid {
        self.id
    }
    fn storage_key(&self) -> &str {
        &self.storage_key
    }
    fn mime_type(&self) -> &str {
        &self.mime_type
    }
    fn file_extension(&self) -> &str {
        &self.file_extension
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Document entry with descriptive metadata, composing the base record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDocument {
    pub base: Document,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub author: String,
    /// Parsed creation date from embedded metadata, when one parsed.
    pub content_created_at: Option<NaiveDateTime>,
    /// Raw creation-date string, kept when parsing failed.
    pub content_created_raw: Option<String>,
    pub uploaded_by: Option<Uuid>,
    /// Extracted plaintext for an external full-text indexer.
    pub plaintext: String,
}

impl DetailedDocument {
    pub fn from_upload(original_filename: &str) -> Self {
        Self::new(Document::from_upload(original_filename))
    }

    pub fn new(base: Document) -> Self {
        Self {
            base,
            title: String::new(),
            slug: String::new(),
            summary: String::new(),
            author: String::new(),
            content_created_at: None,
            content_created_raw: None,
            uploaded_by: None,
            plaintext: String::new(),
        }
    }
}

impl DocumentEntity for DetailedDocument {
    fn id(&self) -> Uuid {
        self.base.id
    }
    fn storage_key(&self) -> &str {
        &self.base.storage_key
    }
    fn mime_type(&self) -> &str {
        &self.base.mime_type
    }
    fn file_extension(&self) -> &str {
        &self.base.file_extension
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.base.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.base.updated_at
    }

    /// Slug-based friendly filename: slug words joined by underscores plus
    /// the stored extension. Falls back to the base form without a slug.
    fn friendly_filename_or(&self, fallback_basename: &str) -> String {
        if self.slug.trim().is_empty() {
            return self.base.friendly_filename_or(fallback_basename);
        }
        format!(
            "{}{}",
            self.slug.split_whitespace().collect::<Vec<_>>().join("_"),
            self.base.file_extension
        )
    }
}

impl fmt::Display for DetailedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            let id = self.base.id.to_string();
            write!(f, "untitled ({}...{})", &id[..3], &id[id.len() - 3..])
        } else {
            write!(f, "{}", self.title)
        }
    }
}
