//! JSON metadata index.
//!
//! The index is a pretty-printed JSON array of [`DocumentRecord`]s, ordered
//! by creation time and then id so rewrites of an unchanged set are
//! byte-identical.

use docvault_common::{Error, Result};

use crate::document::{Document, DocumentRecord};

/// Project documents into index records, in index order.
pub fn records_of<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Vec<DocumentRecord> {
    let mut records: Vec<DocumentRecord> = documents.into_iter().map(Document::to_record).collect();
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    records
}

/// Serialize records to index text.
pub fn to_json(records: &[DocumentRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| Error::Storage(format!("Cannot serialize document index: {}", e)))
}

/// Parse index text.
///
/// # Errors
/// - `Error::Storage` if the text is neither blank nor a valid record list
pub fn from_json(text: &str) -> Result<Vec<DocumentRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
        .map_err(|e| Error::Storage(format!("Malformed document index: {}", e)))
}
