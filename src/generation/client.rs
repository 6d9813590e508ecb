//! HTTP client for the external generation service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationError, GenerationService};

/// Client for a prompt-in, text-out generation endpoint.
pub struct HttpGenerationClient {
    client: Client,
    base_url: String,
}

/// Request payload for the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Response from the generation endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

impl HttpGenerationClient {
    /// Create a new generation client.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the generation service is healthy.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/v1/generate", self.base_url);
        debug!(prompt_chars = prompt.len(), "Sending prompt to generation service");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body: GenerateResponse = response.json().await?;
                Ok(body.text)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(GenerationError::RateLimited),
            StatusCode::SERVICE_UNAVAILABLE => Err(GenerationError::Unavailable),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(GenerationError::Upstream {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
