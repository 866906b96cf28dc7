//! Per-claim evidence quality scoring

use crate::clamp_score;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use verity_domain::text::clip;
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::{ClaimQuality, EvidenceBundle, SourceRecord};

/// Snippet length handed to the model per source
const PROMPT_SNIPPET_CHARS: usize = 150;

/// Payload the quality prompt asks the model to produce
#[derive(Debug, Deserialize)]
struct QualityPayload {
    #[serde(default)]
    reliability_score: i64,
    #[serde(default)]
    authoritative_sources: bool,
    #[serde(default)]
    consensus: Option<String>,
    #[serde(default)]
    top_source_index: Option<usize>,
}

/// Scores each claim's evidence bundle for authority and consensus.
///
/// Claims are assessed independently, one at a time; a failure for one
/// claim degrades that claim alone to a guarded-neutral assessment.
/// Claims without a single real source short-circuit to reliability 0.
pub struct QualityScorer<L> {
    llm: Arc<L>,
}

impl<L> QualityScorer<L>
where
    L: LlmProvider,
{
    /// Create a scorer over the shared LLM provider
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Score every claim in the bundle, in bundle order
    pub async fn score(&self, bundle: &EvidenceBundle) -> Vec<ClaimQuality> {
        let mut assessments = Vec::with_capacity(bundle.len());
        for entry in bundle.iter() {
            let real_sources: Vec<&SourceRecord> = entry
                .sources
                .iter()
                .filter(|s| !s.is_placeholder())
                .collect();

            if real_sources.is_empty() {
                debug!("No real sources for claim, reliability is zero");
                assessments.push(ClaimQuality::no_sources(entry.claim.clone()));
                continue;
            }

            assessments.push(self.score_claim(&entry.claim, &real_sources).await);
        }
        assessments
    }

    async fn score_claim(
        &self,
        claim: &verity_domain::Claim,
        sources: &[&SourceRecord],
    ) -> ClaimQuality {
        let prompt = build_prompt(claim, sources);

        let response = match self.llm.generate(GenerationRequest::new(prompt).json()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Quality scoring LLM call failed: {}", e);
                return ClaimQuality::undetermined(claim.clone(), sources.len());
            }
        };

        let payload: QualityPayload = match verity_decode::decode(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Quality payload undecodable: {}", e);
                return ClaimQuality::undetermined(claim.clone(), sources.len());
            }
        };

        // Clamp the reported top-source index into range; 0 when absent
        let top_index = payload
            .top_source_index
            .filter(|idx| *idx < sources.len())
            .unwrap_or(0);

        ClaimQuality {
            claim: claim.clone(),
            reliability_score: clamp_score(payload.reliability_score),
            sources_count: sources.len(),
            authoritative_sources: payload.authoritative_sources,
            consensus: payload
                .consensus
                .unwrap_or_else(|| "undetermined".to_string()),
            top_source: Some(sources[top_index].clone()),
        }
    }
}

fn build_prompt(claim: &verity_domain::Claim, sources: &[&SourceRecord]) -> String {
    let sources_data: Vec<serde_json::Value> = sources
        .iter()
        .map(|s| {
            serde_json::json!({
                "url": s.url,
                "title": s.title,
                "snippet": clip(&s.snippet, PROMPT_SNIPPET_CHARS),
            })
        })
        .collect();

    format!(
        r#"Assess the quality and reliability of the sources found for this claim: "{claim}"

Sources:
{sources}

Return ONLY JSON:
{{
  "reliability_score": 0-100,
  "authoritative_sources": true/false (is any source an authoritative outlet or organization),
  "consensus": "do the sources agree with each other",
  "top_source_index": zero-based index of the most relevant source
}}"#,
        claim = claim.text,
        sources = serde_json::to_string(&sources_data).unwrap_or_else(|_| "[]".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_domain::Claim;
    use verity_llm::MockProvider;

    fn real(title: &str) -> SourceRecord {
        SourceRecord::new(title, "https://a.example", "snippet")
    }

    fn bundle_with(claim: &str, sources: Vec<SourceRecord>) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::new();
        bundle.insert(Claim::new(claim), sources);
        bundle
    }

    fn scorer(response: &str) -> QualityScorer<MockProvider> {
        QualityScorer::new(Arc::new(MockProvider::new(response)))
    }

    #[tokio::test]
    async fn test_placeholder_only_claim_scores_zero() {
        let bundle = bundle_with(
            "unverified",
            vec![SourceRecord::placeholder("No information found", "nothing")],
        );
        let provider = MockProvider::new("unused");
        let scorer = QualityScorer::new(Arc::new(provider.clone()));

        let assessments = scorer.score(&bundle).await;
        assert_eq!(assessments.len(), 1);
        assert_eq!(assessments[0].reliability_score, 0);
        assert_eq!(assessments[0].sources_count, 0);
        // short-circuited: no LLM call at all
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_payload_maps_to_assessment() {
        let bundle = bundle_with("covered", vec![real("first"), real("second")]);
        let scorer = scorer(
            r#"{"reliability_score": 85, "authoritative_sources": true,
                "consensus": "sources agree", "top_source_index": 1}"#,
        );

        let assessments = scorer.score(&bundle).await;
        let quality = &assessments[0];
        assert_eq!(quality.reliability_score, 85);
        assert!(quality.authoritative_sources);
        assert_eq!(quality.sources_count, 2);
        assert_eq!(quality.top_source.as_ref().unwrap().title, "second");
    }

    #[tokio::test]
    async fn test_out_of_range_top_index_falls_back_to_first() {
        let bundle = bundle_with("covered", vec![real("only")]);
        let scorer = scorer(r#"{"reliability_score": 70, "top_source_index": 9}"#);

        let assessments = scorer.score(&bundle).await;
        assert_eq!(assessments[0].top_source.as_ref().unwrap().title, "only");
    }

    #[tokio::test]
    async fn test_score_clamped_into_range() {
        let bundle = bundle_with("covered", vec![real("s")]);
        let scorer = scorer(r#"{"reliability_score": 900}"#);

        let assessments = scorer.score(&bundle).await;
        assert_eq!(assessments[0].reliability_score, 100);
    }

    #[tokio::test]
    async fn test_undecodable_payload_degrades_to_undetermined() {
        let bundle = bundle_with("covered", vec![real("s")]);
        let scorer = scorer("that is a great question!");

        let assessments = scorer.score(&bundle).await;
        assert_eq!(assessments[0].reliability_score, 30);
        assert_eq!(assessments[0].consensus, "undetermined");
        assert_eq!(assessments[0].sources_count, 1);
    }

    #[tokio::test]
    async fn test_per_claim_failure_is_isolated() {
        let mut bundle = EvidenceBundle::new();
        bundle.insert(Claim::new("good claim"), vec![real("s")]);
        bundle.insert(
            Claim::new("uncovered"),
            vec![SourceRecord::placeholder("No information found", "nothing")],
        );

        let scorer = scorer(r#"{"reliability_score": 60}"#);
        let assessments = scorer.score(&bundle).await;

        assert_eq!(assessments[0].reliability_score, 60);
        assert_eq!(assessments[1].reliability_score, 0);
    }
}
