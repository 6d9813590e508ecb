//! In-memory document store.
//!
//! Holds document records and their chunk sequences for the lifetime of
//! the process. Durable persistence is an external concern; this store
//! honors the same collaborator contract (ordered chunks keyed by
//! document id, chunks destroyed with their document).

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::{Chunk, DocumentRecord, DocumentStatus, DocumentSummary};

/// Shared, concurrency-safe store of document records.
pub struct DocumentStore {
    documents: RwLock<HashMap<Uuid, DocumentRecord>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new document in the `Processing` state and return its id.
    pub async fn create(&self, title: String) -> Uuid {
        let record = DocumentRecord::new(title);
        let id = record.id;
        self.documents.write().await.insert(id, record);
        id
    }

    /// Store the processing result and mark the document `Completed`.
    ///
    /// Text, chunks and status move together in one write, so readers
    /// never observe a completed document without its chunks. Returns
    /// false if the document no longer exists (deleted mid-flight).
    pub async fn complete(&self, id: Uuid, extracted_text: String, chunks: Vec<Chunk>) -> bool {
        let mut documents = self.documents.write().await;
        if let Some(record) = documents.get_mut(&id) {
            record.extracted_text = extracted_text;
            record.chunks = chunks;
            record.status = DocumentStatus::Completed;
            true
        } else {
            false
        }
    }

    /// Mark the document `Failed`.
    pub async fn fail(&self, id: Uuid) -> bool {
        let mut documents = self.documents.write().await;
        if let Some(record) = documents.get_mut(&id) {
            record.status = DocumentStatus::Failed;
            true
        } else {
            false
        }
    }

    /// Get a full document record by id.
    pub async fn get(&self, id: Uuid) -> Option<DocumentRecord> {
        self.documents.read().await.get(&id).cloned()
    }

    /// List document summaries, newest upload first.
    pub async fn list(&self) -> Vec<DocumentSummary> {
        let documents = self.documents.read().await;
        let mut summaries: Vec<DocumentSummary> =
            documents.values().map(|d| d.to_summary()).collect();
        summaries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        summaries
    }

    /// Delete a document and, with it, all of its chunks.
    pub async fn delete(&self, id: Uuid) -> bool {
        self.documents.write().await.remove(&id).is_some()
    }

    /// Bump the last-accessed timestamp.
    pub async fn touch(&self, id: Uuid) -> bool {
        let mut documents = self.documents.write().await;
        if let Some(record) = documents.get_mut(&id) {
            record.last_accessed_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_starts_in_processing() {
        let store = DocumentStore::new();
        let id = store.create("Biology notes".to_string()).await;

        let record = store.get(id).await.unwrap();
        assert_eq!(record.status, DocumentStatus::Processing);
        assert!(record.chunks.is_empty());
    }

    #[tokio::test]
    async fn complete_stores_text_chunks_and_status_together() {
        let store = DocumentStore::new();
        let id = store.create("Notes".to_string()).await;

        let chunks = vec![Chunk::new("alpha beta".to_string(), 0, 0)];
        assert!(store.complete(id, "alpha beta".to_string(), chunks).await);

        let record = store.get(id).await.unwrap();
        assert_eq!(record.status, DocumentStatus::Completed);
        assert_eq!(record.chunks.len(), 1);
        assert_eq!(record.extracted_text, "alpha beta");
    }

    #[tokio::test]
    async fn fail_marks_document_failed() {
        let store = DocumentStore::new();
        let id = store.create("Notes".to_string()).await;

        assert!(store.fail(id).await);
        assert_eq!(store.get(id).await.unwrap().status, DocumentStatus::Failed);
    }

    #[tokio::test]
    async fn delete_removes_document_and_chunks() {
        let store = DocumentStore::new();
        let id = store.create("Notes".to_string()).await;
        store
            .complete(id, "text".to_string(), vec![Chunk::new("text".to_string(), 0, 0)])
            .await;

        assert!(store.delete(id).await);
        assert!(store.get(id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn completing_a_deleted_document_is_a_noop() {
        let store = DocumentStore::new();
        let id = store.create("Notes".to_string()).await;
        store.delete(id).await;

        assert!(!store.complete(id, "text".to_string(), vec![]).await);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let store = DocumentStore::new();
        let first = store.create("First".to_string()).await;
        let second = store.create("Second".to_string()).await;

        let summaries = store.list().await;
        assert_eq!(summaries.len(), 2);
        // Either order is acceptable for identical timestamps, but both
        // documents must be present.
        let ids: Vec<Uuid> = summaries.iter().map(|s| s.id).collect();
        assert!(ids.contains(&first));
        assert!(ids.contains(&second));
    }
}
