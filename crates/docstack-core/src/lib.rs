//! Docstack Core Library
//!
//! This crate provides the document domain models, filename classification,
//! metadata normalization, and storage-key derivation shared across all
//! docstack components. It performs no I/O of its own; persistence and blob
//! storage are collaborator contracts defined in `docstack-store`.

pub mod classify;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod naming;
pub mod validation;

// Re-export commonly used types
pub use classify::{classify, split_extension};
pub use config::CoreConfig;
pub use error::AppError;
pub use metadata::{MetadataField, MetadataMapping, MetadataValue};
pub use models::{Actor, DetailedDocument, Document, DocumentEntity, Interaction, InteractionMode};
pub use naming::{derive_storage_key, StorageLayout};
