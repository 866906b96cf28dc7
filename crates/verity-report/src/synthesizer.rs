//! LLM-written narrative summary of the verification run

use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use verity_domain::text::clip;
use verity_domain::traits::{GenerationRequest, LlmProvider};
use verity_domain::{ClaimQuality, CrossCheckReport, EvidenceBundle, TextCredibility};

/// Fixed fallback emitted when synthesis fails or produces nothing
pub const SYNTHESIS_APOLOGY: &str =
    "A summary could not be generated for this check. The detailed verification results are listed below.";

/// Source text length handed to the model
const PROMPT_TEXT_CHARS: usize = 1000;

#[derive(Serialize)]
struct SynthesisData<'a> {
    credibility: &'a TextCredibility,
    claim_quality: &'a [ClaimQuality],
    cross_check: &'a CrossCheckReport,
    claims_total: usize,
    claims_with_sources: usize,
    real_sources_total: usize,
}

/// Writes the narrative summary that opens the final report.
///
/// The model receives the full structured results as a JSON blob plus
/// coverage statistics, and is asked for plain prose. Reasoning spans are
/// stripped from the output; an empty or failed generation degrades to
/// [`SYNTHESIS_APOLOGY`] so the report always opens with text.
pub struct ReportSynthesizer<L> {
    llm: Arc<L>,
}

impl<L> ReportSynthesizer<L>
where
    L: LlmProvider,
{
    /// Create a synthesizer over the shared LLM provider
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Produce the narrative summary; never fails
    pub async fn synthesize(
        &self,
        text: &str,
        credibility: &TextCredibility,
        qualities: &[ClaimQuality],
        cross_check: &CrossCheckReport,
        bundle: &EvidenceBundle,
    ) -> String {
        let data = SynthesisData {
            credibility,
            claim_quality: qualities,
            cross_check,
            claims_total: bundle.len(),
            claims_with_sources: bundle.claims_with_sources(),
            real_sources_total: bundle.total_real_sources(),
        };

        let prompt = build_prompt(text, &data);

        let response = match self.llm.generate(GenerationRequest::new(prompt)).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Report synthesis LLM call failed: {}", e);
                return SYNTHESIS_APOLOGY.to_string();
            }
        };

        let summary = verity_decode::strip_thinking(&response).trim().to_string();
        if summary.is_empty() {
            warn!("Report synthesis produced empty output");
            return SYNTHESIS_APOLOGY.to_string();
        }
        summary
    }
}

fn build_prompt(text: &str, data: &SynthesisData<'_>) -> String {
    format!(
        r#"Compose a short fact-checking summary for a reader, based on the verification results below.

Text that was checked: {text}

Verification results (JSON):
{data}

Requirements:
- Plain prose, no JSON, no markdown headers
- State how many claims were checked and how many had supporting sources
- Give the overall verdict and the main caveats
- Do not invent findings that are not in the results
- At most 150 words"#,
        text = clip(text, PROMPT_TEXT_CHARS),
        data = serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()),
    )
}
