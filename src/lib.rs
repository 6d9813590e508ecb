//! Studychunk Library
//!
//! Document chunking and retrieval backend for an AI study assistant.
//! Splits extracted document text into bounded, overlapping word chunks
//! and ranks them by lexical relevance to ground downstream generation.

pub mod api;
pub mod chunker;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod retrieval;
pub mod store;
pub mod types;

pub use chunker::{chunk, chunk_pages, chunk_with_defaults};
pub use error::ConfigError;
pub use retrieval::find_relevant_chunks;
pub use store::DocumentStore;
pub use types::{Chunk, DocumentRecord, DocumentStatus, RelevantChunk};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chunker::{chunk, chunk_pages, chunk_with_defaults};
    pub use crate::error::ConfigError;
    pub use crate::retrieval::find_relevant_chunks;
    pub use crate::store::DocumentStore;
    pub use crate::types::*;
}

/// Default chunk size in words
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default chunk overlap in words
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Default number of chunks returned per retrieval
pub const DEFAULT_TOP_K: usize = 3;
