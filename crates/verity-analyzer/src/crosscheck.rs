//! Claim/evidence cross-checking

use crate::clamp_score;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use verity_domain::text::clip;
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::{
    Claim, ConfirmationStatus, CrossCheckReport, CrossCheckResult, EvidenceBundle,
};
use verity_extractor::RelevanceFilter;

/// Source text length handed to the model
const PROMPT_TEXT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
struct CrossCheckPayload {
    #[serde(default)]
    results: Vec<ItemPayload>,
    #[serde(default)]
    overall_score: i64,
    #[serde(default)]
    overall_assessment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemPayload {
    #[serde(default)]
    confirmation_status: String,
    #[serde(default)]
    accuracy_level: Option<String>,
    #[serde(default)]
    context_completeness: Option<String>,
    #[serde(default)]
    temporal_accuracy: Option<String>,
    #[serde(default)]
    confidence_score: i64,
    #[serde(default)]
    explanation: Option<String>,
}

/// Compares the claim set against the gathered evidence.
///
/// Applies its own relevance gate before checking, deliberately redundant
/// with the pipeline's filter stage: it protects report quality when the
/// earlier gate fell back to pass-through. Claims whose evidence is
/// placeholder-only are classified `not_confirmed` with zero confidence
/// without consulting the model. Total failure produces one synthetic
/// error result and a fixed low overall score, never an empty report.
pub struct CrossChecker<L> {
    llm: Arc<L>,
    relevance: RelevanceFilter<L>,
}

impl<L> CrossChecker<L>
where
    L: LlmProvider,
{
    /// Create a cross-checker over the shared LLM provider
    pub fn new(llm: Arc<L>) -> Self {
        let relevance = RelevanceFilter::new(Arc::clone(&llm));
        Self { llm, relevance }
    }

    /// Cross-check the claims against their evidence
    pub async fn check(
        &self,
        text: &str,
        claims: &[Claim],
        bundle: &EvidenceBundle,
    ) -> CrossCheckReport {
        // Second, independent relevance gate
        let relevant = self.relevance.filter(text, claims).await;
        if relevant.len() < claims.len() {
            info!(
                "Cross-check relevance gate excluded {} claims",
                claims.len() - relevant.len()
            );
        }

        let is_unsupported = |claim: &Claim| {
            bundle
                .get(claim)
                .map(|sources| sources.iter().all(|s| s.is_placeholder()))
                .unwrap_or(true)
        };

        let checkable: Vec<Claim> = relevant
            .iter()
            .filter(|&claim| !is_unsupported(claim))
            .cloned()
            .collect();

        if checkable.is_empty() {
            return CrossCheckReport {
                results: relevant
                    .into_iter()
                    .map(CrossCheckResult::unsupported)
                    .collect(),
                overall_score: 0,
                overall_assessment: "no claims could be checked against sources".to_string(),
            };
        }

        match self.check_with_model(text, &checkable, bundle).await {
            Some((checked, overall_score, overall_assessment)) => {
                // Merge back in claim order: the checked verdicts come out in
                // checkable order, which is relevant order minus the
                // unsupported claims.
                let mut checked = checked.into_iter();
                let results = relevant
                    .into_iter()
                    .map(|claim| {
                        if is_unsupported(&claim) {
                            CrossCheckResult::unsupported(claim)
                        } else {
                            checked
                                .next()
                                .unwrap_or_else(|| CrossCheckResult::unsupported(claim))
                        }
                    })
                    .collect();
                CrossCheckReport {
                    results,
                    overall_score,
                    overall_assessment,
                }
            }
            None => CrossCheckReport::check_failed(),
        }
    }

    /// One model call over all checkable claims; `None` signals total failure
    async fn check_with_model(
        &self,
        text: &str,
        claims: &[Claim],
        bundle: &EvidenceBundle,
    ) -> Option<(Vec<CrossCheckResult>, u8, String)> {
        let prompt = build_prompt(text, claims, bundle);

        let response = match self.llm.generate(GenerationRequest::new(prompt).json()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Cross-check LLM call failed: {}", e);
                return None;
            }
        };

        let payload: CrossCheckPayload = match verity_decode::decode(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Cross-check payload undecodable: {}", e);
                return None;
            }
        };

        let mut items = payload.results.into_iter();
        let results = claims
            .iter()
            .map(|claim| {
                let item = items.next().unwrap_or_default();
                CrossCheckResult {
                    claim: claim.clone(),
                    confirmation_status: ConfirmationStatus::parse(&item.confirmation_status),
                    accuracy_level: item
                        .accuracy_level
                        .unwrap_or_else(|| "undetermined".to_string()),
                    context_completeness: item
                        .context_completeness
                        .unwrap_or_else(|| "undetermined".to_string()),
                    temporal_accuracy: item
                        .temporal_accuracy
                        .unwrap_or_else(|| "undetermined".to_string()),
                    confidence_score: clamp_score(item.confidence_score),
                    explanation: item
                        .explanation
                        .unwrap_or_else(|| "no verdict returned for this claim".to_string()),
                }
            })
            .collect();

        Some((
            results,
            clamp_score(payload.overall_score),
            payload
                .overall_assessment
                .unwrap_or_else(|| "undetermined".to_string()),
        ))
    }
}

fn build_prompt(text: &str, claims: &[Claim], bundle: &EvidenceBundle) -> String {
    let sources_data: Vec<serde_json::Value> = claims
        .iter()
        .map(|claim| {
            let sources = bundle.get(claim).unwrap_or(&[]);
            serde_json::json!({
                "claim": claim.text,
                "sources": sources,
            })
        })
        .collect();

    format!(
        r#"Perform a detailed cross-check between the claims from a text and the sources found for them.
For each claim assess:
1. Whether the sources confirm it (fully / partially / not at all / contradict)
2. The accuracy of the claim's wording relative to the sources
3. Whether the claim presents its fact in complete context
4. Whether the claim's temporal markers match the sources

Original text: {text}

Claims and their sources:
{data}

Return ONLY JSON, one result per claim in the given order:
{{
  "results": [
    {{
      "confirmation_status": "confirmed|partially_confirmed|not_confirmed|contradicts",
      "accuracy_level": "accurate|distorted|exaggerated",
      "context_completeness": "complete|incomplete|out_of_context",
      "temporal_accuracy": "matches|mismatched|not_applicable",
      "confidence_score": 0-100,
      "explanation": "short explanation of the verdict"
    }}
  ],
  "overall_score": 0-100,
  "overall_assessment": "overall agreement between claims and sources"
}}"#,
        text = clip(text, PROMPT_TEXT_CHARS),
        data = serde_json::to_string(&sources_data).unwrap_or_else(|_| "[]".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_domain::SourceRecord;
    use verity_llm::MockProvider;

    fn real_bundle(claim: &Claim) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::new();
        bundle.insert(
            claim.clone(),
            vec![SourceRecord::new("title", "https://a.example", "snippet")],
        );
        bundle
    }

    fn placeholder_bundle(claim: &Claim) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::new();
        bundle.insert(
            claim.clone(),
            vec![SourceRecord::placeholder("No information found", "nothing")],
        );
        bundle
    }

    /// Mock that passes the relevance gate through (keeps all claims) and
    /// answers the cross-check prompt with `check_response`.
    fn checker(check_response: &str, claim_count: usize) -> CrossChecker<MockProvider> {
        let mut provider = MockProvider::new(check_response);
        let indices: Vec<String> = (0..claim_count).map(|i| i.to_string()).collect();
        provider.add_contains(
            "relevant_indices",
            format!(r#"{{"relevant_indices": [{}]}}"#, indices.join(", ")),
        );
        CrossChecker::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_placeholder_only_claim_is_not_confirmed_with_zero_confidence() {
        let claim = Claim::new("Event E occurred on date D in place P");
        let bundle = placeholder_bundle(&claim);
        let checker = checker("unused", 1);

        let report = checker.check("text", &[claim.clone()], &bundle).await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.results[0].confirmation_status,
            ConfirmationStatus::NotConfirmed
        );
        assert_eq!(report.results[0].confidence_score, 0);
        assert_eq!(report.overall_score, 0);
    }

    #[tokio::test]
    async fn test_model_verdicts_map_per_claim() {
        let claim = Claim::new("supported claim");
        let bundle = real_bundle(&claim);
        let checker = checker(
            r#"{"results": [{"confirmation_status": "partially confirmed",
                             "accuracy_level": "accurate",
                             "context_completeness": "complete",
                             "temporal_accuracy": "matches",
                             "confidence_score": 80,
                             "explanation": "mostly matches"}],
                "overall_score": 75,
                "overall_assessment": "good agreement"}"#,
            1,
        );

        let report = checker.check("text", &[claim], &bundle).await;
        let result = &report.results[0];
        assert_eq!(
            result.confirmation_status,
            ConfirmationStatus::PartiallyConfirmed
        );
        assert_eq!(result.confidence_score, 80);
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.overall_assessment, "good agreement");
    }

    #[tokio::test]
    async fn test_missing_verdicts_default_rather_than_fail() {
        let first = Claim::new("first");
        let second = Claim::new("second");
        let mut bundle = EvidenceBundle::new();
        bundle.insert(
            first.clone(),
            vec![SourceRecord::new("t", "https://a.example", "s")],
        );
        bundle.insert(
            second.clone(),
            vec![SourceRecord::new("t", "https://b.example", "s")],
        );

        // only one verdict for two claims
        let checker = checker(
            r#"{"results": [{"confirmation_status": "confirmed", "confidence_score": 90}],
                "overall_score": 60, "overall_assessment": "partial"}"#,
            2,
        );

        let report = checker.check("text", &[first, second], &bundle).await;
        assert_eq!(report.results.len(), 2);
        assert_eq!(
            report.results[0].confirmation_status,
            ConfirmationStatus::Confirmed
        );
        assert_eq!(
            report.results[1].confirmation_status,
            ConfirmationStatus::NotConfirmed
        );
        assert_eq!(report.results[1].confidence_score, 0);
    }

    #[tokio::test]
    async fn test_results_follow_claim_order_with_mixed_support() {
        let uncovered = Claim::new("uncovered claim");
        let covered = Claim::new("covered claim");
        let mut bundle = EvidenceBundle::new();
        bundle.insert(
            uncovered.clone(),
            vec![SourceRecord::placeholder("No information found", "nothing")],
        );
        bundle.insert(
            covered.clone(),
            vec![SourceRecord::new("t", "https://a.example", "s")],
        );

        let checker = checker(
            r#"{"results": [{"confirmation_status": "confirmed", "confidence_score": 90,
                             "explanation": "matches the source"}],
                "overall_score": 80, "overall_assessment": "supported"}"#,
            2,
        );

        let report = checker
            .check("text", &[uncovered.clone(), covered.clone()], &bundle)
            .await;

        // Verdicts come back in the order the claims went in, with the
        // unsupported claim in its original slot.
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].claim, uncovered);
        assert_eq!(
            report.results[0].confirmation_status,
            ConfirmationStatus::NotConfirmed
        );
        assert_eq!(report.results[1].claim, covered);
        assert_eq!(
            report.results[1].confirmation_status,
            ConfirmationStatus::Confirmed
        );
        assert_eq!(report.results[1].confidence_score, 90);
    }

    #[tokio::test]
    async fn test_total_failure_yields_synthetic_error_result() {
        let claim = Claim::new("claim");
        let bundle = real_bundle(&claim);
        let checker = checker("no structure in this answer", 1);

        let report = checker.check("text", &[claim], &bundle).await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.overall_score, 20);
        assert!(report.overall_assessment.contains("could not be completed"));
    }

    #[tokio::test]
    async fn test_relevance_gate_excludes_offtopic_claims() {
        let on_topic = Claim::new("on topic");
        let off_topic = Claim::new("off topic");
        let mut bundle = EvidenceBundle::new();
        bundle.insert(
            on_topic.clone(),
            vec![SourceRecord::new("t", "https://a.example", "s")],
        );
        bundle.insert(
            off_topic.clone(),
            vec![SourceRecord::new("t", "https://b.example", "s")],
        );

        let mut provider = MockProvider::new(
            r#"{"results": [{"confirmation_status": "confirmed", "confidence_score": 95}],
                "overall_score": 90, "overall_assessment": "confirmed"}"#,
        );
        // gate keeps only index 0
        provider.add_contains("relevant_indices", r#"{"relevant_indices": [0]}"#);
        let checker = CrossChecker::new(Arc::new(provider));

        let report = checker
            .check("text", &[on_topic.clone(), off_topic], &bundle)
            .await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].claim, on_topic);
    }
}
