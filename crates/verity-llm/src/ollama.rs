//! Ollama Provider Implementation
//!
//! Integration with Ollama's local inference API.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Generation options (temperature, context window, JSON mode)
//! - Retry logic with exponential backoff
//! - Fixed request timeout, so every inference call is bounded

use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use verity_domain::traits::{GenerationRequest, LlmProvider};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds; local models are slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_ctx: u32,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama2", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn generate_inner(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            format: request.options.json_format.then_some("json"),
            options: OllamaOptions {
                temperature: request.options.temperature,
                num_ctx: request.options.num_ctx,
            },
        };

        // Retry with exponential backoff: 1s, 2s, 4s, ...
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(ollama_response) => Ok(ollama_response.response),
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                warn!(
                    "Ollama request failed (attempt {}/{}), retrying",
                    attempts, self.max_retries
                );
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    async fn generate(&self, request: GenerationRequest) -> Result<String, Self::Error> {
        self.generate_inner(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama2");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama2");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "mistral");
    }

    #[test]
    fn test_ollama_provider_with_max_retries() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama2").with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[test]
    fn test_request_body_serializes_json_mode() {
        let body = OllamaGenerateRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            stream: false,
            format: Some("json"),
            options: OllamaOptions {
                temperature: 0.1,
                num_ctx: 8192,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""format":"json""#));
        assert!(json.contains(r#""num_ctx":8192"#));
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Unroutable endpoint to trigger a transport error
        let provider =
            OllamaProvider::new("http://127.0.0.1:1", "llama2").with_max_retries(1);

        let result = provider
            .generate(GenerationRequest::new("test"))
            .await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
