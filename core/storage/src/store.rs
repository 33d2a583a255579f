//! Blob store trait definition.

use async_trait::async_trait;

use docvault_common::{DocumentId, Result};

/// Serialization of an empty document index.
pub const EMPTY_INDEX: &str = "[]";

/// Durable byte-level persistence for document content and the index.
///
/// Implementations know nothing about encryption or documents: content blobs
/// are opaque bytes addressed by id, and the index is opaque text.
///
/// Every failure other than the explicit "missing" cases is returned as an
/// error; nothing is swallowed.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Get the store name (e.g., "local", "memory").
    fn name(&self) -> &str;

    /// Write the content blob for `id`, replacing any previous blob.
    async fn save_content(&self, id: &DocumentId, data: &[u8]) -> Result<()>;

    /// Read the content blob for `id`.
    ///
    /// Returns `Ok(None)` when no blob exists.
    async fn load_content(&self, id: &DocumentId) -> Result<Option<Vec<u8>>>;

    /// Remove the content blob for `id`.
    ///
    /// Returns `true` iff a blob existed and was removed.
    async fn delete_content(&self, id: &DocumentId) -> Result<bool>;

    /// Replace the index artifact.
    async fn save_index(&self, serialized: &str) -> Result<()>;

    /// Read the index artifact.
    ///
    /// Returns [`EMPTY_INDEX`] when the artifact is absent or empty.
    async fn load_index(&self) -> Result<String>;
}
