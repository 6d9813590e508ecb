//! Error types for chunking and retrieval configuration.
//!
//! Invalid settings fail fast and loudly: silently clamping a bad
//! chunk size or overlap would mask caller bugs that matter downstream,
//! where prompt-size limits depend on the configured chunk bounds.

use thiserror::Error;

/// Configuration error raised when chunking or retrieval parameters
/// are invalid. Degenerate *inputs* (empty text, empty chunk lists)
/// are not errors; only caller configuration mistakes are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("overlap ({overlap}) must be less than chunk_size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },

    #[error("top_k must be greater than zero")]
    ZeroTopK,
}
