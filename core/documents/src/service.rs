//! Password-gated document operations.
//!
//! The service is the only component that checks passwords. Metadata
//! (names, timestamps, existence) is visible without a password; content is
//! not.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::document::Document;
use crate::repository::{DocumentOrder, DocumentRepository};
use docvault_common::{DocumentId, Error, Result};
use docvault_crypto::CipherEngine;

/// Document service.
pub struct DocumentService {
    repository: Arc<DocumentRepository>,
    cipher: Arc<dyn CipherEngine>,
}

impl DocumentService {
    pub fn new(repository: Arc<DocumentRepository>, cipher: Arc<dyn CipherEngine>) -> Self {
        Self { repository, cipher }
    }

    /// Encrypt and store a new document under `password`.
    ///
    /// # Errors
    /// - Encryption failure
    /// - Storage failure while persisting
    pub async fn store_document(
        &self,
        name: &str,
        content: &str,
        password: &str,
    ) -> Result<Document> {
        let id = DocumentId::generate();
        let password_hash = self.cipher.hash_password(password);
        let encrypted = self.cipher.encrypt(content.as_bytes(), password)?;

        let document = Document::new(id, name, encrypted, password_hash);
        self.repository.save(document.clone()).await?;

        info!(document_id = %document.id(), "Stored document");
        Ok(document)
    }

    /// Decrypt a document's content.
    ///
    /// Returns `Ok(None)` if no document has this id.
    ///
    /// # Errors
    /// - `Error::Unauthorized` if the password does not unlock the document
    pub async fn get_document_content(
        &self,
        id: &DocumentId,
        password: &str,
    ) -> Result<Option<String>> {
        let Some(document) = self.repository.find_by_id(id).await else {
            return Ok(None);
        };

        self.authorize(&document, password)?;
        let plaintext = self.open_content(&document, password)?;

        debug!(document_id = %id, "Decrypted document content");
        Ok(Some(plaintext))
    }

    /// Document metadata, without decrypting anything.
    pub async fn get_document(&self, id: &DocumentId) -> Option<Document> {
        self.repository.find_by_id(id).await
    }

    /// All documents, newest first.
    pub async fn get_all_documents(&self) -> Vec<Document> {
        self.repository.find_all_ordered(DocumentOrder::CreatedDesc).await
    }

    /// All documents, most recently modified first.
    pub async fn get_documents_updated_recently(&self) -> Vec<Document> {
        self.repository.find_all_ordered(DocumentOrder::UpdatedDesc).await
    }

    /// Documents created strictly between `from` and `to`, newest first.
    pub async fn get_documents_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<Document> {
        self.repository.find_by_date_range(from, to).await
    }

    /// Case-insensitive search on document names.
    pub async fn search_documents_by_name(&self, needle: &str) -> Vec<Document> {
        self.repository.find_by_name_containing(needle).await
    }

    pub async fn get_document_count(&self) -> usize {
        self.repository.count().await
    }

    /// Replace a document's content, keeping its password.
    ///
    /// # Errors
    /// - `Error::NotFound` if no document has this id
    /// - `Error::Unauthorized` if the password does not unlock the document
    pub async fn update_document_content(
        &self,
        id: &DocumentId,
        new_content: &str,
        password: &str,
    ) -> Result<Document> {
        let document = self
            .repository
            .update_with(id, |document| {
                self.authorize(document, password)?;
                let encrypted = self.cipher.encrypt(new_content.as_bytes(), password)?;
                document.set_encrypted_content(encrypted);
                Ok(())
            })
            .await?
            .ok_or_else(|| Error::NotFound(format!("Document {} not found", id)))?;

        info!(document_id = %id, "Updated document content");
        Ok(document)
    }

    /// Re-encrypt a document under a new password.
    ///
    /// Returns `Ok(false)` if no document has this id.
    ///
    /// # Errors
    /// - `Error::Unauthorized` if `old_password` does not unlock the document
    pub async fn change_password(
        &self,
        id: &DocumentId,
        old_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        let changed = self
            .repository
            .update_with(id, |document| {
                self.authorize(document, old_password)?;
                let plaintext = self.open_content(document, old_password)?;

                let encrypted = self.cipher.encrypt(plaintext.as_bytes(), new_password)?;
                document.set_encrypted_content(encrypted);
                document.set_password_hash(self.cipher.hash_password(new_password));
                Ok(())
            })
            .await?
            .is_some();

        if changed {
            info!(document_id = %id, "Changed document password");
        }
        Ok(changed)
    }

    /// Delete a document. No password is required.
    pub async fn delete_document(&self, id: &DocumentId) -> Result<bool> {
        let deleted = self.repository.delete_by_id(id).await?;
        if deleted {
            info!(document_id = %id, "Deleted document");
        }
        Ok(deleted)
    }

    fn authorize(&self, document: &Document, password: &str) -> Result<()> {
        if self.cipher.verify_password(password, document.password_hash()) {
            Ok(())
        } else {
            Err(Error::Unauthorized("Wrong password".to_string()))
        }
    }

    /// Decrypt content after the verifier matched. An authentication failure
    /// here is reported exactly like a wrong password.
    fn open_content(&self, document: &Document, password: &str) -> Result<String> {
        let bytes = self
            .cipher
            .decrypt(document.encrypted_content(), password)
            .map_err(|_| Error::Unauthorized("Wrong password".to_string()))?;
        String::from_utf8(bytes)
            .map_err(|_| Error::Crypto("Document content is not valid UTF-8".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use docvault_crypto::PasswordCipher;
    use docvault_storage::{BlobStore, LocalBlobStore, MemoryBlobStore};
    use tempfile::TempDir;

    async fn service_with(store: Arc<dyn BlobStore>) -> DocumentService {
        let repository = Arc::new(DocumentRepository::open(store).await.unwrap());
        DocumentService::new(repository, Arc::new(PasswordCipher::new()))
    }

    async fn memory_service() -> (DocumentService, MemoryBlobStore) {
        let store = MemoryBlobStore::new();
        (service_with(Arc::new(store.clone())).await, store)
    }

    #[tokio::test]
    async fn test_store_document() {
        let (service, store) = memory_service().await;

        let document = service
            .store_document("Notes", "secret text", "pw1")
            .await
            .unwrap();

        assert_eq!(document.name(), "Notes");
        assert_eq!(document.password_hash(), docvault_crypto::hash_password("pw1"));
        assert_ne!(document.encrypted_content(), b"secret text");
        assert_eq!(document.created_at(), document.updated_at());
        assert_eq!(
            store.load_content(document.id()).await.unwrap().as_deref(),
            Some(document.encrypted_content())
        );
        assert_eq!(service.get_document_count().await, 1);
    }

    #[tokio::test]
    async fn test_password_scenario() {
        let (service, _store) = memory_service().await;
        let id = service
            .store_document("Notes", "secret text", "pw1")
            .await
            .unwrap()
            .id()
            .clone();

        assert_eq!(
            service.get_document_content(&id, "pw1").await.unwrap(),
            Some("secret text".to_string())
        );
        assert!(matches!(
            service.get_document_content(&id, "wrong").await,
            Err(Error::Unauthorized(_))
        ));

        assert!(service.change_password(&id, "pw1", "pw2").await.unwrap());

        assert!(matches!(
            service.get_document_content(&id, "pw1").await,
            Err(Error::Unauthorized(_))
        ));
        assert_eq!(
            service.get_document_content(&id, "pw2").await.unwrap(),
            Some("secret text".to_string())
        );
    }

    #[tokio::test]
    async fn test_content_of_missing_document_is_none() {
        let (service, _store) = memory_service().await;
        let id = DocumentId::new("missing").unwrap();

        assert_eq!(service.get_document_content(&id, "pw").await.unwrap(), None);
        assert!(service.get_document(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_tampered_content_looks_like_wrong_password() {
        let (service, store) = memory_service().await;
        let document = service.store_document("Doc", "text", "pw").await.unwrap();

        let mut tampered = document.encrypted_content().to_vec();
        let last = tampered.len() - 1;
        tampered[last] ^= 0xFF;
        store.save_content(document.id(), &tampered).await.unwrap();

        let service = service_with(Arc::new(store.clone())).await;

        assert!(matches!(
            service.get_document_content(document.id(), "pw").await,
            Err(Error::Unauthorized(_))
        ));
        assert!(matches!(
            service.change_password(document.id(), "pw", "new").await,
            Err(Error::Unauthorized(_))
        ));
        assert_eq!(
            store.load_content(document.id()).await.unwrap(),
            Some(tampered)
        );
    }

    #[tokio::test]
    async fn test_update_document_content() {
        let (service, _store) = memory_service().await;
        let original = service.store_document("Doc", "v1", "pw").await.unwrap();

        let updated = service
            .update_document_content(original.id(), "v2", "pw")
            .await
            .unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert!(updated.updated_at() >= original.updated_at());
        assert_eq!(updated.password_hash(), original.password_hash());
        assert_ne!(updated.encrypted_content(), original.encrypted_content());
        assert_eq!(
            service.get_document_content(original.id(), "pw").await.unwrap(),
            Some("v2".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_missing_document_is_not_found() {
        let (service, _store) = memory_service().await;
        let id = DocumentId::new("missing").unwrap();

        let result = service.update_document_content(&id, "content", "password").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_wrong_password_does_not_mutate() {
        let (service, store) = memory_service().await;
        let original = service.store_document("Doc", "v1", "pw").await.unwrap();
        let index_before = store.load_index().await.unwrap();

        let result = service
            .update_document_content(original.id(), "v2", "wrong")
            .await;

        assert!(matches!(result, Err(Error::Unauthorized(_))));
        let stored = service.get_document(original.id()).await.unwrap();
        assert_eq!(stored.encrypted_content(), original.encrypted_content());
        assert_eq!(stored.updated_at(), original.updated_at());
        assert_eq!(
            store.load_content(original.id()).await.unwrap().as_deref(),
            Some(original.encrypted_content())
        );
        assert_eq!(store.load_index().await.unwrap(), index_before);
    }

    #[tokio::test]
    async fn test_update_after_delete_does_not_restore_document() {
        let (service, store) = memory_service().await;
        let document = service.store_document("Doc", "v1", "pw").await.unwrap();

        assert!(service.delete_document(document.id()).await.unwrap());
        let result = service
            .update_document_content(document.id(), "v2", "pw")
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(!service.change_password(document.id(), "pw", "new").await.unwrap());
        assert_eq!(service.get_document_count().await, 0);
        assert!(store.content_ids().unwrap().is_empty());
        assert_eq!(store.load_index().await.unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_change_password_missing_document_is_false() {
        let (service, _store) = memory_service().await;
        let id = DocumentId::new("missing").unwrap();

        assert!(!service.change_password(&id, "old", "new").await.unwrap());
    }

    #[tokio::test]
    async fn test_change_password_with_wrong_old_password() {
        let (service, _store) = memory_service().await;
        let document = service.store_document("Doc", "text", "pw").await.unwrap();

        let result = service.change_password(document.id(), "nope", "new").await;

        assert!(matches!(result, Err(Error::Unauthorized(_))));
        let stored = service.get_document(document.id()).await.unwrap();
        assert_eq!(stored.password_hash(), document.password_hash());
    }

    #[tokio::test]
    async fn test_change_password_replaces_hash_and_content() {
        let (service, _store) = memory_service().await;
        let document = service.store_document("Doc", "text", "old").await.unwrap();

        service
            .change_password(document.id(), "old", "new")
            .await
            .unwrap();

        let stored = service.get_document(document.id()).await.unwrap();
        assert_eq!(stored.password_hash(), docvault_crypto::hash_password("new"));
        assert_ne!(stored.encrypted_content(), document.encrypted_content());
        assert_eq!(stored.created_at(), document.created_at());
    }

    #[tokio::test]
    async fn test_delete_requires_no_password() {
        let (service, store) = memory_service().await;
        let document = service.store_document("Doc", "text", "pw").await.unwrap();

        assert!(service.delete_document(document.id()).await.unwrap());
        assert!(!service.delete_document(document.id()).await.unwrap());
        assert!(service.get_document(document.id()).await.is_none());
        assert!(store.content_ids().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_and_search() {
        let (service, _store) = memory_service().await;
        for name in ["Java Tutorial", "Python Basics", "JAVASCRIPT GUIDE"] {
            service.store_document(name, "body", "pw").await.unwrap();
        }

        assert_eq!(service.get_all_documents().await.len(), 3);
        assert_eq!(service.get_documents_updated_recently().await.len(), 3);

        let found = service.search_documents_by_name("java").await;
        let names: Vec<&str> = found.iter().map(Document::name).collect();
        assert_eq!(names, vec!["JAVASCRIPT GUIDE", "Java Tutorial"]);

        let now = Utc::now();
        let recent = service
            .get_documents_created_between(now - Duration::minutes(5), now + Duration::minutes(5))
            .await;
        assert_eq!(recent.len(), 3);
    }

    #[tokio::test]
    async fn test_same_password_yields_same_verifier_across_documents() {
        let (service, _store) = memory_service().await;
        let a = service.store_document("A", "one", "shared").await.unwrap();
        let b = service.store_document("B", "two", "shared").await.unwrap();

        assert_eq!(a.password_hash(), b.password_hash());
        assert_ne!(a.encrypted_content(), b.encrypted_content());
    }

    #[tokio::test]
    async fn test_documents_survive_restart() {
        let temp = TempDir::new().unwrap();

        let (id, created_at) = {
            let service = service_with(Arc::new(LocalBlobStore::new(temp.path()).unwrap())).await;
            let document = service
                .store_document("Notes", "Привет, мир! 🌍", "pw1")
                .await
                .unwrap();
            (document.id().clone(), document.created_at())
        };

        let service = service_with(Arc::new(LocalBlobStore::new(temp.path()).unwrap())).await;
        let reloaded = service.get_document(&id).await.unwrap();

        assert_eq!(reloaded.name(), "Notes");
        assert_eq!(reloaded.created_at(), created_at);
        assert_eq!(
            service.get_document_content(&id, "pw1").await.unwrap(),
            Some("Привет, мир! 🌍".to_string())
        );
    }
}
