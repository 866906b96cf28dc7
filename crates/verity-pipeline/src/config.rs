//! Top-level pipeline configuration

use serde::{Deserialize, Serialize};
use verity_extractor::ExtractorConfig;
use verity_gatekeeper::RateLimiterConfig;
use verity_search::SearchConfig;

/// Configuration for a complete pipeline instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum input text length (characters); longer input is clipped
    pub max_input_chars: usize,

    /// Maximum concurrent evidence searches; 1 serializes them
    pub evidence_concurrency: usize,

    /// Maximum final report length (characters)
    pub report_max_chars: usize,

    /// Admission control settings
    pub limiter: RateLimiterConfig,

    /// Claim extraction settings
    pub extractor: ExtractorConfig,

    /// Search client settings
    pub search: SearchConfig,
}

impl PipelineConfig {
    /// Validate the configuration, delegating to each section
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.evidence_concurrency == 0 {
            return Err("evidence_concurrency must be greater than 0".to_string());
        }
        if self.report_max_chars == 0 {
            return Err("report_max_chars must be greater than 0".to_string());
        }
        self.limiter.validate()?;
        self.extractor.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Preset with no search delay, for tests
    pub fn no_delay() -> Self {
        Self {
            search: SearchConfig::no_delay(),
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

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 2000,
            evidence_concurrency: 1,
            report_max_chars: 4000,
            limiter: RateLimiterConfig::default(),
            extractor: ExtractorConfig::default(),
            search: SearchConfig::default(),
        }
    }
}
