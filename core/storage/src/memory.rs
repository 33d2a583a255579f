//! In-memory blob store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::{BlobStore, EMPTY_INDEX};
use docvault_common::{DocumentId, Error, Result};

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<DocumentId, Vec<u8>>,
    index: String,
}

/// In-memory blob store.
///
/// Useful for testing and ephemeral use. Clones share the same storage, so a
/// test can keep a handle while a repository owns another.
#[derive(Clone)]
pub struct MemoryBlobStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryBlobStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                blobs: HashMap::new(),
                index: EMPTY_INDEX.to_string(),
            })),
        }
    }

    /// Ids of all stored blobs, sorted.
    pub fn content_ids(&self) -> Result<Vec<DocumentId>> {
        let mut ids: Vec<DocumentId> = self.read()?.blobs.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::Storage("Memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::Storage("Memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn save_content(&self, id: &DocumentId, data: &[u8]) -> Result<()> {
        self.write()?.blobs.insert(id.clone(), data.to_vec());
        Ok(())
    }

    async fn load_content(&self, id: &DocumentId) -> Result<Option<Vec<u8>>> {
        Ok(self.read()?.blobs.get(id).cloned())
    }

    async fn delete_content(&self, id: &DocumentId) -> Result<bool> {
        Ok(self.write()?.blobs.remove(id).is_some())
    }

    async fn save_index(&self, serialized: &str) -> Result<()> {
        self.write()?.index = serialized.to_string();
        Ok(())
    }

    async fn load_index(&self) -> Result<String> {
        let inner = self.read()?;
        if inner.index.trim().is_empty() {
            Ok(EMPTY_INDEX.to_string())
        } else {
            Ok(inner.index.clone())
        }
    }
}
