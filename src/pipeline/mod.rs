//! Background document processing.
//!
//! One task per uploaded document: chunk the extracted text, store the
//! result, flip the status. The chunker itself is pure and idempotent,
//! so re-running a document (retry after failure, duplicate upload
//! event) simply overwrites the previous result.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::chunker;
use crate::store::DocumentStore;
use crate::types::ChunkConfig;

/// Processor that chunks uploaded documents in the background.
pub struct DocumentProcessor {
    store: Arc<DocumentStore>,
    config: ChunkConfig,
}

impl DocumentProcessor {
    /// Create a new processor bound to a store and chunking settings.
    pub fn new(store: Arc<DocumentStore>, config: ChunkConfig) -> Self {
        Self { store, config }
    }

    /// Chunk `text` (or per-page spans, when supplied) and store the
    /// result for `document_id`.
    ///
    /// Marks the document `Completed` on success and `Failed` on error.
    /// Configuration errors surface here rather than at upload time
    /// because chunking settings are service-level, not per-request.
    pub async fn process(&self, document_id: Uuid, text: String, pages: Option<Vec<String>>) {
        info!(
            document_id = %document_id,
            chars = text.len(),
            paged = pages.is_some(),
            "Processing document"
        );

        let result = match &pages {
            Some(page_texts) => {
                chunker::chunk_pages(page_texts, self.config.chunk_size, self.config.overlap)
            }
            None => chunker::chunk(&text, self.config.chunk_size, self.config.overlap),
        };

        match result {
            Ok(chunks) => {
                let chunk_count = chunks.len();
                if self.store.complete(document_id, text, chunks).await {
                    info!(
                        document_id = %document_id,
                        chunks = chunk_count,
                        "Document processed successfully"
                    );
                } else {
                    info!(
                        document_id = %document_id,
                        "Document deleted before processing finished"
                    );
                }
            }
            Err(e) => {
                error!(
                    document_id = %document_id,
                    error = %e,
                    "Failed to process document"
                );
                self.store.fail(document_id).await;
            }
        }
    }
}
