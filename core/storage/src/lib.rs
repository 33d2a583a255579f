//! Blob storage for DocVault.
//!
//! This crate persists two kinds of artifacts and nothing else:
//! - one opaque content blob per document, addressed by document id
//! - a single metadata index, stored as text
//!
//! It has no notion of encryption or of what a document is.

pub mod config;
pub mod local;
pub mod memory;
pub mod store;

pub use config::StoreConfig;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use store::{BlobStore, EMPTY_INDEX};
