//! Configuration for the search client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the search client and its HTTP backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider endpoint URL
    pub endpoint: String,

    /// Provider API key
    pub api_key: String,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Maximum records returned per query
    pub max_results: usize,

    /// Passages requested per document
    pub max_passages: u32,

    /// Minimum pre-dispatch delay (milliseconds)
    pub min_delay_ms: u64,

    /// Maximum pre-dispatch delay (milliseconds)
    pub max_delay_ms: u64,
}

impl SearchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        if self.max_passages == 0 {
            return Err("max_passages must be greater than 0".to_string());
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err("min_delay_ms cannot exceed max_delay_ms".to_string());
        }
        Ok(())
    }

    /// Preset with no pre-dispatch delay, for tests
    pub fn no_delay() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SearchConfig {
    /// Defaults sized for provider courtesy: a short jittered delay before
    /// every call and a small page of results
    fn default() -> Self {
        Self {
            endpoint: "https://search.example/api".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
            max_results: 5,
            max_passages: 2,
            min_delay_ms: 500,
            max_delay_ms: 1500,
        }
    }
}
