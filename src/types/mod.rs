//! Core types for the study-assistant backend.

mod chunk;
mod config;
mod document;

pub use chunk::{Chunk, RelevantChunk};
pub use config::{ChunkConfig, RetrievalConfig, ServiceConfig};
pub use document::{
    DocumentDetail, DocumentRecord, DocumentStatus, DocumentSummary, IngestDocumentRequest,
    IngestDocumentResponse,
};
