//! Claim extraction over the LLM seam

use crate::config::ExtractorConfig;
use crate::prompt::ExtractionPrompt;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use verity_domain::text::clip;
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::Claim;

/// Payload the extraction prompt asks the model to produce
#[derive(Debug, Default, Deserialize)]
struct FactsPayload {
    #[serde(default)]
    facts: Vec<String>,
}

/// Extracts a bounded set of self-contained claims from text.
///
/// Infallible at its boundary: any LLM or decode failure degrades to an
/// empty claim list, which downstream stages treat as a normal outcome.
pub struct ClaimExtractor<L> {
    llm: Arc<L>,
    config: ExtractorConfig,
}

impl<L> ClaimExtractor<L>
where
    L: LlmProvider,
{
    /// Create an extractor over the shared LLM provider
    pub fn new(llm: Arc<L>, config: ExtractorConfig) -> Self {
        Self { llm, config }
    }

    /// Extract claims from text, capped at the configured maximum
    pub async fn extract(&self, text: &str) -> Vec<Claim> {
        let text = clip(text, self.config.max_text_length);
        let prompt = ExtractionPrompt::new(&text).build();

        debug!("Extraction prompt length: {} chars", prompt.len());

        let response = match self.llm.generate(GenerationRequest::new(prompt).json()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Claim extraction LLM call failed: {}", e);
                return Vec::new();
            }
        };

        let payload = verity_decode::decode_or(&response, FactsPayload::default());

        let claims: Vec<Claim> = payload
            .facts
            .into_iter()
            .map(Claim::new)
            .filter(|claim| !claim.is_empty())
            .take(self.config.max_claims)
            .collect();

        info!("Extracted {} claims", claims.len());
        claims
    }
}
