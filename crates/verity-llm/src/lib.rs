//! Verity LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `verity-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `OllamaProvider`: local Ollama API integration
//!
//! Responses from any provider are free text that MAY be malformed; callers
//! route them through `verity-decode` before use.

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use verity_domain::traits::{GenerationRequest, LlmProvider};

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be keyed by exact prompt or by a substring of the prompt;
/// substring rules let one mock serve the several distinct prompt families
/// of a full pipeline run.
///
/// # Examples
///
/// ```
/// use verity_llm::MockProvider;
/// use verity_domain::traits::{GenerationRequest, LlmProvider};
///
/// # tokio_test();
/// # fn tokio_test() {
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let mut provider = MockProvider::new("default");
/// provider.add_contains("Extract", r#"{"facts": ["a fact"]}"#);
///
/// let out = provider
///     .generate(GenerationRequest::new("Extract claims from ..."))
///     .await
///     .unwrap();
/// assert!(out.contains("a fact"));
/// # });
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    contains_rules: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
    fail_all: Arc<Mutex<bool>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            contains_rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail_all: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a specific response for an exact prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Add a response for any prompt containing `needle`.
    ///
    /// Rules are checked in insertion order; the first match wins.
    pub fn add_contains(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.contains_rules
            .lock()
            .unwrap()
            .push((needle.into(), response.into()));
    }

    /// Make every subsequent call fail with a communication error
    pub fn fail_all(&mut self) {
        *self.fail_all.lock().unwrap() = true;
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, request: GenerationRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if *self.fail_all.lock().unwrap() {
            return Err(LlmError::Communication("mock failure".to_string()));
        }

        if let Some(response) = self.responses.lock().unwrap().get(&request.prompt) {
            return Ok(response.clone());
        }

        for (needle, response) in self.contains_rules.lock().unwrap().iter() {
            if request.prompt.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest::new(prompt)
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(request("any prompt")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_exact_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate(request("hello")).await.unwrap(), "world");
        assert_eq!(provider.generate(request("foo")).await.unwrap(), "bar");
        assert_eq!(
            provider.generate(request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_contains_rules_in_order() {
        let mut provider = MockProvider::default();
        provider.add_contains("Extract", "extraction response");
        provider.add_contains("Ex", "broader rule");

        let out = provider
            .generate(request("Extract the claims"))
            .await
            .unwrap();
        assert_eq!(out, "extraction response");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate(request("one")).await.unwrap();
        provider.generate(request("two")).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_failure_mode() {
        let mut provider = MockProvider::default();
        provider.fail_all();

        let result = provider.generate(request("anything")).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate(request("x")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
