//! Common types used throughout DocVault.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored document.
///
/// The identifier doubles as the filename stem of the document's content
/// blob, so it must be non-empty and free of path syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a DocumentId from a string.
    ///
    /// # Errors
    /// - Returns error if id is empty
    /// - Returns error if id contains a path separator or is `.`/`..`
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(crate::Error::InvalidInput(
                "DocumentId cannot be empty".to_string(),
            ));
        }
        if id.contains('/') || id.contains('\\') || id == "." || id == ".." {
            return Err(crate::Error::InvalidInput(format!(
                "DocumentId is not a valid file stem: {}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_creation() {
        let id = DocumentId::new("report-2024").unwrap();
        assert_eq!(id.as_str(), "report-2024");
        assert_eq!(id.to_string(), "report-2024");
    }

    #[test]
    fn test_document_id_empty_fails() {
        assert!(DocumentId::new("").is_err());
    }

    #[test]
    fn test_document_id_rejects_path_syntax() {
        assert!(DocumentId::new("../etc").is_err());
        assert!(DocumentId::new("a\\b").is_err());
        assert!(DocumentId::new("..").is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert!(DocumentId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_document_id_serde_validates() {
        let id: DocumentId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        assert!(serde_json::from_str::<DocumentId>("\"a/b\"").is_err());
    }
}
