//! Collaborator contracts
//!
//! The document core calls into three external services: a record store for
//! documents, an append-only store for interactions, and a blob store for
//! file content. All three are expressed as traits so the embedding
//! application can supply its own database or object storage.

use async_trait::async_trait;
use docstack_core::models::{Actor, DetailedDocument, Interaction, InteractionMode};
use uuid::Uuid;

use crate::error::StoreResult;

/// Blob storage: store bytes at a key, atomically, and hand them back later.
///
/// Keys are the storage keys derived by the core
/// (`documents/<id><extension>`); implementations must treat them as opaque
/// but may reject keys that escape their root.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob at the given key, overwriting any previous content.
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> StoreResult<()>;

    /// Fetch a blob by its key.
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Check whether a blob exists.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Delete a blob by its key.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Persistence contract for document records.
///
/// Implementations must enforce id uniqueness and stamp `created_at` /
/// `updated_at` on write, mirroring what a database layer with
/// auto-timestamps would do.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new record. Fails with `DuplicateId` if the id exists.
    async fn create(&self, document: DetailedDocument) -> StoreResult<DetailedDocument>;

    /// Update an existing record, refreshing its update timestamp.
    async fn update(&self, document: DetailedDocument) -> StoreResult<DetailedDocument>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> StoreResult<Option<DetailedDocument>>;
}

/// Persistence contract for the interaction log. Append-only by design:
/// there is no update or delete.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Append one interaction record.
    async fn append(&self, interaction: Interaction) -> StoreResult<Interaction>;

    /// True iff at least one record matches document, mode, and actor.
    async fn exists(
        &self,
        document_id: Uuid,
        mode: InteractionMode,
        actor: &Actor,
    ) -> StoreResult<bool>;

    /// All interactions recorded for a document, in append order.
    async fn list_for_document(&self, document_id: Uuid) -> StoreResult<Vec<Interaction>>;
}
