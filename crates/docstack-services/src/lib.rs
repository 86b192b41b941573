//! Docstack Services Layer
//!
//! This crate is the orchestration layer over the core models and the store
//! contracts: the upload intake pipeline (derive key, classify, store blob,
//! persist record, apply metadata) and the interaction ledger. Keep
//! coordination here; keep pure domain logic in docstack-core and transport
//! concerns in the embedding application.

pub mod extract;
pub mod intake;
pub mod ledger;

pub use extract::{MetadataExtractor, NoOpMetadataExtractor};
pub use intake::{DocumentIntake, UploadRequest};
pub use ledger::InteractionLedger;

// Re-export the collaborator contracts so embedders depend on one facade.
pub use docstack_store::{BlobStore, DocumentStore, InteractionStore};
