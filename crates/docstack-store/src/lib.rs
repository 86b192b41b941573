//! Docstack Store Layer
//!
//! This crate defines the contracts the document core expects from its
//! persistence and blob-storage collaborators, plus two implementations:
//! in-memory stores (reference semantics and test doubles) and a local
//! filesystem blob store. Real deployments substitute their own database
//! and object storage behind the same traits.

pub mod error;
pub mod local;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use local::FsBlobStore;
pub use memory::{MemoryBlobStore, MemoryDocumentStore, MemoryInteractionStore};
pub use traits::{BlobStore, DocumentStore, InteractionStore};
