//! In-memory store implementations
//!
//! Reference implementations of the collaborator contracts, used by the
//! service tests and small embeddings that do not need a database. They
//! reproduce the semantics real backends must provide: id uniqueness,
//! timestamp stamping, and append-only interactions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use docstack_core::models::{Actor, DetailedDocument, Interaction, InteractionMode};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, DocumentStore, InteractionStore};

/// In-memory document store.
#[derive(Default)]
pub struct MemoryDocumentStore {
    records: RwLock<HashMap<Uuid, DetailedDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, mut document: DetailedDocument) -> StoreResult<DetailedDocument> {
        let mut records = self.records.write().await;
        if records.contains_key(&document.base.id) {
            return Err(StoreError::DuplicateId(document.base.id.to_string()));
        }
        let now = Utc::now();
        document.base.created_at = now;
        document.base.updated_at = now;
        records.insert(document.base.id, document.clone());
        Ok(document)
    }

    async fn update(&self, mut document: DetailedDocument) -> StoreResult<DetailedDocument> {
        let mut records = self.records.write().await;
        if !records.contains_key(&document.base.id) {
            return Err(StoreError::NotFound(document.base.id.to_string()));
        }
        document.base.touch();
        records.insert(document.base.id, document.clone());
        Ok(document)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<DetailedDocument>> {
        Ok(self.records.read().await.get(&id).cloned())
    }
}

/// In-memory append-only interaction store.
#[derive(Default)]
pub struct MemoryInteractionStore {
    records: RwLock<Vec<Interaction>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl InteractionStore for MemoryInteractionStore {
    async fn append(&self, interaction: Interaction) -> StoreResult<Interaction> {
        self.records.write().await.push(interaction.clone());
        Ok(interaction)
    }

    async fn exists(
        &self,
        document_id: Uuid,
        mode: InteractionMode,
        actor: &Actor,
    ) -> StoreResult<bool> {
        let records = self.records.read().await;
        Ok(records.iter().any(|r| {
            r.document_id == document_id && r.mode == mode && r.matches_actor(actor)
        }))
    }

    async fn list_for_document(&self, document_id: Uuid) -> StoreResult<Vec<Interaction>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.document_id == document_id)
            .cloned()
            .collect())
    }
}

/// In-memory blob store keyed by storage key.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> StoreResult<()> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), (content_type.to_string(), data));
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(key)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.blobs.read().await.contains_key(key))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.blobs
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstack_core::models::Document;

    fn new_document() -> DetailedDocument {
        DetailedDocument::new(Document::from_upload("report.pdf"))
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps_and_enforces_uniqueness() {
        let store = MemoryDocumentStore::new();
        let doc = new_document();

        let created = store.create(doc.clone()).await.unwrap();
        assert_eq!(created.base.created_at, created.base.updated_at);

        let duplicate = store.create(created.clone()).await;
        assert!(matches!(duplicate, Err(StoreError::DuplicateId(_))));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryDocumentStore::new();
        let mut doc = store.create(new_document()).await.unwrap();
        let created_at = doc.base.created_at;

        doc.title = "Quarterly Report".to_string();
        let updated = store.update(doc).await.unwrap();
        assert_eq!(updated.base.created_at, created_at);
        assert!(updated.base.updated_at >= created_at);
        assert_eq!(
            store.get(updated.base.id).await.unwrap().unwrap().title,
            "Quarterly Report"
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let store = MemoryDocumentStore::new();
        let result = store.update(new_document()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_interactions_append_only_and_queryable() {
        let store = MemoryInteractionStore::new();
        let document_id = Uuid::new_v4();
        let actor = Actor::Session("sess-1".to_string());

        store
            .append(Interaction::viewed(document_id, &actor))
            .await
            .unwrap();
        store
            .append(Interaction::viewed(document_id, &actor))
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store
            .exists(document_id, InteractionMode::Viewed, &actor)
            .await
            .unwrap());
        assert!(!store
            .exists(document_id, InteractionMode::Downloaded, &actor)
            .await
            .unwrap());
        assert_eq!(store.list_for_document(document_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blob_round_trip() {
        let store = MemoryBlobStore::new();
        store
            .put("documents/abc.pdf", "application/pdf", b"content".to_vec())
            .await
            .unwrap();
        assert!(store.exists("documents/abc.pdf").await.unwrap());
        assert_eq!(store.get("documents/abc.pdf").await.unwrap(), b"content");

        store.delete("documents/abc.pdf").await.unwrap();
        assert!(!store.exists("documents/abc.pdf").await.unwrap());
        assert!(matches!(
            store.get("documents/abc.pdf").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
