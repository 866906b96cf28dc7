//! Internal credibility analysis of the source text

use crate::clamp_score;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;
use verity_domain::text::clip;
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::TextCredibility;

/// Source text length handed to the model
const PROMPT_TEXT_CHARS: usize = 1500;

#[derive(Debug, Deserialize)]
struct CredibilityPayload {
    #[serde(default = "default_score")]
    credibility_score: i64,
    #[serde(default)]
    language_assessment: Option<String>,
    #[serde(default)]
    internal_consistency: Option<String>,
    #[serde(default)]
    specificity: Option<String>,
    #[serde(default)]
    sources_cited: Option<String>,
    #[serde(default)]
    balance: Option<String>,
    #[serde(default)]
    manipulation_signals: Option<String>,
    #[serde(default)]
    conclusion: Option<String>,
}

fn default_score() -> i64 {
    verity_domain::NEUTRAL_CREDIBILITY_SCORE as i64
}

/// Assesses the credibility of the text itself, independent of any
/// external evidence: language, consistency, specificity, balance.
///
/// Runs concurrently with claim extraction since neither needs the other's
/// output. Failure degrades to [`TextCredibility::neutral`].
pub struct TextCredibilityAnalyzer<L> {
    llm: Arc<L>,
}

impl<L> TextCredibilityAnalyzer<L>
where
    L: LlmProvider,
{
    /// Create an analyzer over the shared LLM provider
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Analyze the text; never fails
    pub async fn analyze(&self, text: &str) -> TextCredibility {
        let prompt = build_prompt(text);

        let response = match self.llm.generate(GenerationRequest::new(prompt).json()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Credibility LLM call failed: {}", e);
                return TextCredibility::neutral();
            }
        };

        let payload: CredibilityPayload = match verity_decode::decode(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Credibility payload undecodable: {}", e);
                return TextCredibility::neutral();
            }
        };

        let or_unassessed =
            |field: Option<String>| field.unwrap_or_else(|| "not assessed".to_string());

        TextCredibility {
            credibility_score: clamp_score(payload.credibility_score),
            language_assessment: or_unassessed(payload.language_assessment),
            internal_consistency: or_unassessed(payload.internal_consistency),
            specificity: or_unassessed(payload.specificity),
            sources_cited: or_unassessed(payload.sources_cited),
            balance: or_unassessed(payload.balance),
            manipulation_signals: or_unassessed(payload.manipulation_signals),
            conclusion: payload
                .conclusion
                .unwrap_or_else(|| "no conclusion returned".to_string()),
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the internal credibility of this text, using only the text itself:

"{text}"

Assess:
1. Language: neutral or emotionally manipulative
2. Internal logical consistency
3. Specificity: concrete dates, names, figures
4. Quality of sources the text itself cites
5. Balance of viewpoints
6. Signs of manipulation

Return ONLY JSON:
{{
  "credibility_score": 0-100,
  "language_assessment": "short assessment",
  "internal_consistency": "short assessment",
  "specificity": "short assessment",
  "sources_cited": "short assessment",
  "balance": "short assessment",
  "manipulation_signals": "short assessment",
  "conclusion": "one-sentence conclusion"
}}"#,
        text = clip(text, PROMPT_TEXT_CHARS),
    )
}
