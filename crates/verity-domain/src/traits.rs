//! Trait definitions for external interactions
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates (`verity-llm`,
//! `verity-search`). Both seams are async: every call suspends at a
//! network boundary.

use crate::search::{ProviderResponse, SearchQuery};
use async_trait::async_trait;

/// Generation options forwarded to the inference service
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature; the pipeline wants near-deterministic output
    pub temperature: f32,

    /// Context window size in tokens
    pub num_ctx: u32,

    /// Ask the provider to constrain output to JSON
    pub json_format: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            num_ctx: 8192,
            json_format: false,
        }
    }
}

/// A single inference request: opaque prompt text plus generation options
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Prompt text; opaque to the core
    pub prompt: String,

    /// Generation options
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Create a request with default options
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    /// Request JSON-constrained output
    pub fn json(mut self) -> Self {
        self.options.json_format = true;
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }
}

/// Trait for inference service operations
///
/// The response text MAY BE MALFORMED; callers must route it through the
/// structured decoder before treating it as data.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for inference operations
    type Error: std::fmt::Display + Send;

    /// Generate a text completion
    async fn generate(&self, request: GenerationRequest) -> Result<String, Self::Error>;
}

/// Trait for the raw search provider transport
///
/// Implementations perform one query round-trip and surface transport
/// failures as errors; domain errors arrive inside the response document.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Error type for transport failures (network, timeout, malformed body)
    type Error: std::fmt::Display + Send;

    /// Execute one structured query against the provider
    async fn fetch(&self, query: &SearchQuery) -> Result<ProviderResponse, Self::Error>;
}
