//! On-disk layout configuration for the local blob store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use docvault_common::{Error, Result};

/// Default storage root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "documents_storage";

/// Default content directory name under the root.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Default index filename under the root.
pub const DEFAULT_INDEX_FILE: &str = "metadata.json";

/// Default extension of content blobs.
pub const DEFAULT_CONTENT_EXTENSION: &str = "enc";

/// Layout of a local document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Storage root directory.
    pub root: PathBuf,
    /// Directory (relative to root) holding one blob per document.
    pub content_dir: String,
    /// Index filename (relative to root).
    pub index_file: String,
    /// Extension appended to each document id to form its blob filename.
    pub content_extension: String,
}

impl StoreConfig {
    /// Default layout under a custom root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid store configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Absolute or relative path of the content directory.
    pub fn content_path(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    /// Path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }

    /// Reject layouts whose paths would leave the storage root.
    pub(crate) fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("content_dir", &self.content_dir),
            ("index_file", &self.index_file),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
            }
        }
        for (field, value) in [
            ("content_dir", &self.content_dir),
            ("index_file", &self.index_file),
            ("content_extension", &self.content_extension),
        ] {
            if value.contains('/') || value.contains('\\') || value == ".." {
                return Err(Error::InvalidInput(format!(
                    "{} cannot contain path separators",
                    field
                )));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            content_dir: DEFAULT_CONTENT_DIR.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            content_extension: DEFAULT_CONTENT_EXTENSION.to_string(),
        }
    }
}
