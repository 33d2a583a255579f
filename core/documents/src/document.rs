//! Document entity and its persisted metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use docvault_common::DocumentId;

/// A stored, encrypted text document.
///
/// Identity is the id alone: two `Document` values compare equal iff their
/// ids are equal.
#[derive(Clone)]
pub struct Document {
    id: DocumentId,
    name: String,
    encrypted_content: Vec<u8>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a document stamped with the current time.
    pub fn new(
        id: DocumentId,
        name: impl Into<String>,
        encrypted_content: Vec<u8>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            encrypted_content,
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a document from its persisted record and content blob.
    ///
    /// Timestamps are taken from the record unchanged.
    pub fn from_record(record: DocumentRecord, encrypted_content: Vec<u8>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            encrypted_content,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encrypted_content(&self) -> &[u8] {
        &self.encrypted_content
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the encrypted content and bump `updated_at`.
    ///
    /// `updated_at` never drops below `created_at`, even if the clock moved
    /// backwards.
    pub fn set_encrypted_content(&mut self, encrypted_content: Vec<u8>) {
        self.encrypted_content = encrypted_content;
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Replace the password verifier. Does not touch `updated_at`.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    /// Non-secret projection persisted in the index.
    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            password_hash: self.password_hash.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("name", &self.name)
            .field(
                "encrypted_content",
                &format_args!("[{} bytes]", self.encrypted_content.len()),
            )
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Durable metadata for one document. Excludes the encrypted content, which
/// lives in its own blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
