//! Configuration for the rate limiter

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the sliding-window rate limiter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Window length (seconds)
    pub window_secs: u64,

    /// Maximum admitted requests per identity within the window
    pub capacity: usize,
}

impl RateLimiterConfig {
    /// Get the window as a Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_secs == 0 {
            return Err("window_secs must be greater than 0".to_string());
        }
        if self.capacity == 0 {
            return Err("capacity must be greater than 0".to_string());
        }
        Ok(())
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

impl Default for RateLimiterConfig {
    /// One-hour window, 15 requests per identity
    fn default() -> Self {
        Self {
            window_secs: 3600,
            capacity: 15,
        }
    }
}
