//! Relevance filtering over the LLM seam

use crate::prompt::RelevancePrompt;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::Claim;

/// Payload the relevance prompt asks the model to produce
#[derive(Debug, Deserialize)]
struct RelevancePayload {
    relevant_indices: Vec<usize>,
}

/// Narrows a claim set to the claims on-topic for the source text.
///
/// Fallback policy is conservative: on any failure the *original* claim
/// list is returned unfiltered; over-inclusion is preferred to silently
/// losing claims.
pub struct RelevanceFilter<L> {
    llm: Arc<L>,
}

impl<L> RelevanceFilter<L>
where
    L: LlmProvider,
{
    /// Create a filter over the shared LLM provider
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Keep the claims on-topic for `text`, preserving their order
    pub async fn filter(&self, text: &str, claims: &[Claim]) -> Vec<Claim> {
        if claims.is_empty() {
            return Vec::new();
        }

        let prompt = RelevancePrompt::new(text, claims).build();

        let response = match self.llm.generate(GenerationRequest::new(prompt).json()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Relevance filter LLM call failed, keeping all claims: {}", e);
                return claims.to_vec();
            }
        };

        let payload: RelevancePayload = match verity_decode::decode(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Relevance payload undecodable, keeping all claims: {}", e);
                return claims.to_vec();
            }
        };

        let mut seen = HashSet::new();
        let kept: Vec<Claim> = payload
            .relevant_indices
            .into_iter()
            .filter(|idx| *idx < claims.len() && seen.insert(*idx))
            .map(|idx| claims[idx].clone())
            .collect();

        info!("Relevance filter kept {}/{} claims", kept.len(), claims.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_llm::MockProvider;

    fn claims() -> Vec<Claim> {
        vec![
            Claim::new("claim zero"),
            Claim::new("claim one"),
            Claim::new("claim two"),
        ]
    }

    fn filter(response: &str) -> RelevanceFilter<MockProvider> {
        RelevanceFilter::new(Arc::new(MockProvider::new(response)))
    }

    #[tokio::test]
    async fn test_keeps_selected_indices_in_order() {
        let filter = filter(r#"{"relevant_indices": [0, 2]}"#);

        let kept = filter.filter("text", &claims()).await;
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].text, "claim zero");
        assert_eq!(kept[1].text, "claim two");
    }

    #[tokio::test]
    async fn test_out_of_range_and_duplicate_indices_dropped() {
        let filter = filter(r#"{"relevant_indices": [1, 1, 99]}"#);

        let kept = filter.filter("text", &claims()).await;
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "claim one");
    }

    #[tokio::test]
    async fn test_undecodable_response_keeps_original_list() {
        let filter = filter("no structure here");

        let kept = filter.filter("text", &claims()).await;
        assert_eq!(kept.len(), 3);
    }

    #[tokio::test]
    async fn test_llm_failure_keeps_original_list() {
        let mut provider = MockProvider::default();
        provider.fail_all();
        let filter = RelevanceFilter::new(Arc::new(provider));

        let kept = filter.filter("text", &claims()).await;
        assert_eq!(kept.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let provider = MockProvider::new("unused");
        let filter = RelevanceFilter::new(Arc::new(provider.clone()));

        let kept = filter.filter("text", &[]).await;
        assert!(kept.is_empty());
        assert_eq!(provider.call_count(), 0);
    }
}
