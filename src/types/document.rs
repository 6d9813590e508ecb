//! Document records and API request/response definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Chunk;

/// Lifecycle status of an uploaded document.
///
/// A document starts `Processing` while its text is chunked in the
/// background, then moves to `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Background chunking is still running
    Processing,
    /// Chunks are stored and the document is queryable
    Completed,
    /// Chunking failed; the document holds no usable chunks
    Failed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Completed => write!(f, "completed"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A stored document: extracted text, its chunk sequence, and lifecycle
/// metadata. Chunks live and die with their owning record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier for this document
    pub id: Uuid,

    /// User-supplied title
    pub title: String,

    /// Current lifecycle status
    pub status: DocumentStatus,

    /// Raw extracted text, as supplied by the external extractor
    pub extracted_text: String,

    /// Ordered chunk sequence, `chunk_index` 0..n-1
    pub chunks: Vec<Chunk>,

    /// When the document was uploaded
    pub uploaded_at: DateTime<Utc>,

    /// When the document was last read
    pub last_accessed_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Create a fresh record in the `Processing` state.
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            status: DocumentStatus::Processing,
            extracted_text: String::new(),
            chunks: Vec::new(),
            uploaded_at: now,
            last_accessed_at: now,
        }
    }

    /// Summary view without the text payloads.
    pub fn to_summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            title: self.title.clone(),
            status: self.status,
            chunk_count: self.chunks.len(),
            uploaded_at: self.uploaded_at,
            last_accessed_at: self.last_accessed_at,
        }
    }
}

/// Lightweight listing view of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document id
    pub id: Uuid,

    /// User-supplied title
    pub title: String,

    /// Current lifecycle status
    pub status: DocumentStatus,

    /// Number of stored chunks
    pub chunk_count: usize,

    /// When the document was uploaded
    pub uploaded_at: DateTime<Utc>,

    /// When the document was last read
    pub last_accessed_at: DateTime<Utc>,
}

/// Detail view returned for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: DocumentSummary,

    /// Length of the extracted text in characters
    pub extracted_chars: usize,
}

/// Request to ingest an already-extracted document.
///
/// PDF-to-text extraction happens upstream; this service receives the
/// flat text, or per-page spans when the extractor can supply them.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestDocumentRequest {
    /// Title for the document
    pub title: String,

    /// Full extracted text
    pub text: String,

    /// Optional per-page text spans (1-based page attribution)
    #[serde(default)]
    pub pages: Option<Vec<String>>,
}

/// Response when a document has been accepted for processing.
#[derive(Debug, Clone, Serialize)]
pub struct IngestDocumentResponse {
    /// ID of the created document
    pub document_id: Uuid,

    /// Status at accept time (always `processing`)
    pub status: DocumentStatus,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
