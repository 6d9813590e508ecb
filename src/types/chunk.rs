//! Chunk type definitions.

use serde::{Deserialize, Serialize};

/// A bounded, indexed slice of a document's extracted text.
///
/// Chunks are the unit of retrieval: a document's text is split into an
/// ordered sequence of overlapping word windows, and questions are
/// answered against the most relevant windows. A chunk belongs to
/// exactly one document and is dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The slice text (words joined by single spaces)
    pub content: String,

    /// Best-effort page attribution; 0 when the extractor supplied no
    /// page information
    pub page_number: usize,

    /// 0-based position in the document's chunk sequence; contiguous
    /// within a document
    pub chunk_index: usize,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(content: String, page_number: usize, chunk_index: usize) -> Self {
        Self {
            content,
            page_number,
            chunk_index,
        }
    }

    /// Get the length of the chunk content in characters.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Count the words in the chunk content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A chunk paired with its relevance score for one query.
///
/// Transient: built fresh for every retrieval call and consumed by the
/// prompt builder, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevantChunk {
    /// The scored chunk
    pub chunk: Chunk,

    /// Number of distinct query terms present in the chunk
    pub score: usize,
}

impl RelevantChunk {
    /// The chunk's text content.
    pub fn content(&self) -> &str {
        &self.chunk.content
    }

    /// The chunk's position within its document.
    pub fn chunk_index(&self) -> usize {
        self.chunk.chunk_index
    }
}
