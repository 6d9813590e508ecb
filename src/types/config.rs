//! Configuration types for chunking and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TOP_K};

/// Configuration for individual chunk operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Words per chunk
    pub chunk_size: usize,

    /// Words repeated at the start of the next chunk
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkConfig {
    /// Create a config with the given chunk size.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            ..Default::default()
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Validate the configuration. Invalid settings are rejected
    /// outright rather than clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// Configuration for relevance retrieval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks returned per query
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl RetrievalConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        Ok(())
    }
}

/// Global service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Chunking settings applied at ingestion
    pub chunking: ChunkConfig,

    /// Retrieval settings applied per question
    pub retrieval: RetrievalConfig,

    /// Base URL of the external generation service, if configured
    pub generation_service_url: Option<String>,

    /// Maximum generation attempts (including the first)
    pub generation_max_retries: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkConfig::default(),
            retrieval: RetrievalConfig::default(),
            generation_service_url: None,
            generation_max_retries: 3,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            chunking: ChunkConfig {
                chunk_size: std::env::var("CHUNK_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CHUNK_SIZE),
                overlap: std::env::var("CHUNK_OVERLAP")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            },
            retrieval: RetrievalConfig {
                top_k: std::env::var("TOP_K")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TOP_K),
            },
            generation_service_url: std::env::var("GENERATION_SERVICE_URL").ok(),
            generation_max_retries: std::env::var("GENERATION_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Validate every tunable at once, so a bad deployment fails at
    /// startup instead of on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn overlap_equal_to_size_is_rejected() {
        let config = ChunkConfig::with_size(100).with_overlap(100);
        assert_eq!(
            config.validate(),
            Err(ConfigError::OverlapTooLarge {
                overlap: 100,
                chunk_size: 100
            })
        );
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = ChunkConfig::with_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroChunkSize));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let config = RetrievalConfig { top_k: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTopK));
    }
}
