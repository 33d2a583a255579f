//! Local filesystem blob store.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::config::StoreConfig;
use crate::store::{BlobStore, EMPTY_INDEX};
use docvault_common::{DocumentId, Result};

/// Local filesystem blob store.
///
/// Layout (defaults):
/// ```text
/// <root>/metadata.json       index
/// <root>/content/<id>.enc    one blob per document
/// ```
pub struct LocalBlobStore {
    config: StoreConfig,
    content_dir: PathBuf,
    index_path: PathBuf,
}

impl LocalBlobStore {
    /// Open a store with the default layout under `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(StoreConfig::with_root(root.as_ref()))
    }

    /// Open a store with an explicit layout.
    ///
    /// # Postconditions
    /// - Root and content directories exist
    /// - The index file exists (an empty list is written if it was missing)
    ///
    /// # Errors
    /// - `Error::InvalidInput` if the layout is invalid
    /// - Permission denied or other I/O failure while creating the layout
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let content_dir = config.content_path();
        let index_path = config.index_path();

        // Sync for constructor
        std::fs::create_dir_all(&config.root)?;
        std::fs::create_dir_all(&content_dir)?;
        if !index_path.exists() {
            std::fs::write(&index_path, EMPTY_INDEX)?;
        }

        Ok(Self {
            config,
            content_dir,
            index_path,
        })
    }

    /// Filesystem path of the blob for `id`.
    pub fn content_path(&self, id: &DocumentId) -> PathBuf {
        let filename = if self.config.content_extension.is_empty() {
            id.as_str().to_string()
        } else {
            format!("{}.{}", id, self.config.content_extension)
        };
        self.content_dir.join(filename)
    }

    /// Filesystem path of the index.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn save_content(&self, id: &DocumentId, data: &[u8]) -> Result<()> {
        fs::write(self.content_path(id), data).await?;
        debug!(document_id = %id, bytes = data.len(), "Saved document content");
        Ok(())
    }

    async fn load_content(&self, id: &DocumentId) -> Result<Option<Vec<u8>>> {
        match fs::read(self.content_path(id)).await {
            Ok(data) => {
                debug!(document_id = %id, "Loaded document content");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_content(&self, id: &DocumentId) -> Result<bool> {
        match fs::remove_file(self.content_path(id)).await {
            Ok(()) => {
                debug!(document_id = %id, "Deleted document content");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_index(&self, serialized: &str) -> Result<()> {
        fs::write(&self.index_path, serialized).await?;
        debug!("Saved document index");
        Ok(())
    }

    async fn load_index(&self) -> Result<String> {
        match fs::read_to_string(&self.index_path).await {
            Ok(text) if text.trim().is_empty() => Ok(EMPTY_INDEX.to_string()),
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(EMPTY_INDEX.to_string()),
            Err(e) => Err(e.into()),
        }
    }
}
