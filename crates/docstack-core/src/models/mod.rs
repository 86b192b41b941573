//! Data models for the document core
//!
//! Each sub-module represents one entity family: documents (base and
//! metadata-rich variants) and the append-only interaction log.

mod document;
mod interaction;

// Re-export all models for convenient imports
pub use document::*;
pub use interaction::*;
