//! Cache-over-disk document repository.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::index;
use docvault_common::{DocumentId, Result};
use docvault_storage::BlobStore;

/// Ordering for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrder {
    /// Newest first by creation time.
    CreatedDesc,
    /// Most recently modified first.
    UpdatedDesc,
    /// Alphabetical by name.
    NameAsc,
}

/// In-memory document cache backed by a [`BlobStore`].
///
/// The repository is the single writer of content blobs and of the index.
/// Every mutation holds the write lock until both are persisted, so readers
/// never see a half-applied change and the index always reflects one
/// snapshot of the map.
pub struct DocumentRepository {
    documents: RwLock<HashMap<DocumentId, Document>>,
    store: Arc<dyn BlobStore>,
}

impl DocumentRepository {
    /// Open a repository, rehydrating the cache from `store`.
    ///
    /// Index records whose content blob is missing are dropped.
    ///
    /// # Errors
    /// - Storage failure while reading the index or blobs
    /// - Malformed index
    pub async fn open(store: Arc<dyn BlobStore>) -> Result<Self> {
        let records = index::from_json(&store.load_index().await?)?;

        let mut documents = HashMap::with_capacity(records.len());
        for record in records {
            match store.load_content(&record.id).await? {
                Some(content) => {
                    documents.insert(record.id.clone(), Document::from_record(record, content));
                }
                None => {
                    warn!(document_id = %record.id, "Dropping index record without content");
                }
            }
        }

        info!(
            store = store.name(),
            count = documents.len(),
            "Loaded documents from storage"
        );

        Ok(Self {
            documents: RwLock::new(documents),
            store,
        })
    }

    /// Insert or replace a document and persist it.
    ///
    /// The content blob is written first, then the document becomes visible
    /// in the cache, then the full index is rewritten. If the index write
    /// fails the document stays cached and its blob is durable, but it will
    /// not survive a restart.
    pub async fn save(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().await;
        self.persist(&mut documents, document).await
    }

    /// Modify a cached document and persist the result under one write lock.
    ///
    /// Returns `Ok(None)` (and touches no storage) if the id is unknown. If
    /// `update` fails, nothing is changed and its error is returned. A
    /// concurrent delete either completes before the lookup or waits until
    /// the update is durable.
    pub async fn update_with<F>(&self, id: &DocumentId, update: F) -> Result<Option<Document>>
    where
        F: FnOnce(&mut Document) -> Result<()>,
    {
        let mut documents = self.documents.write().await;

        let Some(mut document) = documents.get(id).cloned() else {
            return Ok(None);
        };
        update(&mut document)?;

        self.persist(&mut documents, document.clone()).await?;
        Ok(Some(document))
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }

    /// All documents, in no particular order.
    pub async fn find_all(&self) -> Vec<Document> {
        self.documents.read().await.values().cloned().collect()
    }

    /// All documents in the requested order.
    pub async fn find_all_ordered(&self, order: DocumentOrder) -> Vec<Document> {
        let mut documents = self.find_all().await;
        sort_documents(&mut documents, order);
        documents
    }

    /// Remove a document and its durable artifacts.
    ///
    /// Returns `false` (and touches no storage) if the id is unknown.
    pub async fn delete_by_id(&self, id: &DocumentId) -> Result<bool> {
        let mut documents = self.documents.write().await;

        let Some(removed) = documents.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.store.delete_content(id).await {
            documents.insert(id.clone(), removed);
            return Err(e);
        }
        debug!(document_id = %id, "Deleted document");

        self.write_index(&documents).await?;
        Ok(true)
    }

    pub async fn exists_by_id(&self, id: &DocumentId) -> bool {
        self.documents.read().await.contains_key(id)
    }

    /// Documents whose name contains `needle`, ignoring case, sorted by name.
    pub async fn find_by_name_containing(&self, needle: &str) -> Vec<Document> {
        let needle = needle.to_lowercase();
        let mut matches: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|doc| doc.name().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_documents(&mut matches, DocumentOrder::NameAsc);
        matches
    }

    /// Documents created strictly between `from` and `to`, newest first.
    pub async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<Document> {
        let mut matches: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|doc| doc.created_at() > from && doc.created_at() < to)
            .cloned()
            .collect();
        sort_documents(&mut matches, DocumentOrder::CreatedDesc);
        matches
    }

    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    async fn persist(
        &self,
        documents: &mut HashMap<DocumentId, Document>,
        document: Document,
    ) -> Result<()> {
        self.store
            .save_content(document.id(), document.encrypted_content())
            .await?;
        debug!(document_id = %document.id(), "Saved document");
        documents.insert(document.id().clone(), document);

        self.write_index(documents).await
    }

    async fn write_index(&self, documents: &HashMap<DocumentId, Document>) -> Result<()> {
        let records = index::records_of(documents.values());
        self.store.save_index(&index::to_json(&records)?).await
    }
}

fn sort_documents(documents: &mut [Document], order: DocumentOrder) {
    match order {
        DocumentOrder::CreatedDesc => documents.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        }),
        DocumentOrder::UpdatedDesc => documents.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| a.id().cmp(b.id()))
        }),
        DocumentOrder::NameAsc => {
            documents.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())))
        }
    }
}
