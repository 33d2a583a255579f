//! Encrypted document repository for DocVault.
//!
//! This module provides:
//! - The `Document` entity and its non-secret `DocumentRecord` projection
//! - The JSON metadata index
//! - `DocumentRepository`, an in-memory cache kept in sync with a blob store
//! - `DocumentService`, the only layer that checks passwords
//!
//! # Architecture
//! Callers talk to the service; the service talks to the repository and the
//! cipher engine; the repository is the single writer of blobs and index.

pub mod document;
pub mod index;
pub mod repository;
pub mod service;

pub use document::{Document, DocumentRecord};
pub use repository::{DocumentOrder, DocumentRepository};
pub use service::DocumentService;
