//! Opaque generation-service collaborator.
//!
//! The assistant never generates text itself: it builds a prompt from
//! retrieved chunks and hands it to an external generation service,
//! which may be rate limited or transiently unavailable. Retry with
//! exponential backoff lives here, on the calling side, never inside
//! the chunking/retrieval core.

mod client;
mod parse;
mod prompts;

pub use client::HttpGenerationClient;
pub use parse::{parse_flashcards, parse_quiz, Difficulty, Flashcard, QuizQuestion};
pub use prompts::{
    build_answer_prompt, build_explain_prompt, build_flashcard_prompt, build_quiz_prompt,
    build_summary_prompt,
};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors from the external generation service.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation service rate limit exceeded")]
    RateLimited,

    #[error("generation service temporarily unavailable")]
    Unavailable,

    #[error("generation service returned an empty response")]
    EmptyResponse,

    #[error("generation service error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GenerationError {
    /// Whether the condition is worth retrying with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::RateLimited | GenerationError::Unavailable)
    }
}

/// An external text-generation service: prompt string in, generated
/// string out, asynchronously.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Retry settings for generation calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Backoff before retry i is `base_delay * 2^i`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt count and the default delay.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Call the generation service, retrying rate-limit and transient
/// unavailability with exponential backoff.
///
/// Non-retryable errors and empty responses propagate immediately; an
/// empty generation means the upstream model misbehaved, and repeating
/// the same prompt will not fix it.
pub async fn generate_with_retry(
    service: &dyn GenerationService,
    prompt: &str,
    policy: RetryPolicy,
) -> Result<String, GenerationError> {
    let mut attempt = 0;
    loop {
        match service.generate(prompt).await {
            Ok(text) => {
                if text.trim().is_empty() {
                    return Err(GenerationError::EmptyResponse);
                }
                return Ok(text);
            }
            Err(e) if e.is_retryable() && attempt + 1 < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Generation service busy, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Service that fails with the given error a fixed number of times
    /// before succeeding.
    struct FlakyService {
        failures: u32,
        calls: AtomicU32,
        error: fn() -> GenerationError,
    }

    #[async_trait]
    impl GenerationService for FlakyService {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err((self.error)())
            } else {
                Ok("generated text".to_string())
            }
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn succeeds_without_retry() {
        let service = FlakyService {
            failures: 0,
            calls: AtomicU32::new(0),
            error: || GenerationError::RateLimited,
        };
        let result = generate_with_retry(&service, "prompt", fast_policy(3)).await;
        assert_eq!(result.unwrap(), "generated text");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limit_until_success() {
        let service = FlakyService {
            failures: 2,
            calls: AtomicU32::new(0),
            error: || GenerationError::RateLimited,
        };
        let result = generate_with_retry(&service, "prompt", fast_policy(3)).await;
        assert_eq!(result.unwrap(), "generated text");
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let service = FlakyService {
            failures: 10,
            calls: AtomicU32::new(0),
            error: || GenerationError::Unavailable,
        };
        let result = generate_with_retry(&service, "prompt", fast_policy(3)).await;
        assert!(matches!(result, Err(GenerationError::Unavailable)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_error_propagates_immediately() {
        let service = FlakyService {
            failures: 10,
            calls: AtomicU32::new(0),
            error: || GenerationError::Upstream {
                status: 500,
                message: "boom".to_string(),
            },
        };
        let result = generate_with_retry(&service, "prompt", fast_policy(3)).await;
        assert!(matches!(result, Err(GenerationError::Upstream { .. })));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_response_is_an_error_and_not_retried() {
        struct EmptyService;

        #[async_trait]
        impl GenerationService for EmptyService {
            async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
                Ok("   ".to_string())
            }
        }

        let result = generate_with_retry(&EmptyService, "prompt", fast_policy(3)).await;
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_secs(2),
        };
        assert_eq!(policy.delay_for(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for(2), Duration::from_secs(8));
    }
}
