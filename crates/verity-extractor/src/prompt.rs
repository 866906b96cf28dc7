//! LLM prompt construction for extraction and relevance filtering

use verity_domain::Claim;

/// Builds the claim-extraction prompt
pub struct ExtractionPrompt<'a> {
    text: &'a str,
}

impl<'a> ExtractionPrompt<'a> {
    /// Create a prompt builder for the given source text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\nText to analyze:\n---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");
        prompt.push_str(EXTRACTION_FORMAT_REMINDER);

        prompt
    }
}

/// Builds the relevance-filter prompt over a numbered claim list
pub struct RelevancePrompt<'a> {
    text: &'a str,
    claims: &'a [Claim],
}

impl<'a> RelevancePrompt<'a> {
    /// Create a prompt builder for the given text and candidate claims
    pub fn new(text: &'a str, claims: &'a [Claim]) -> Self {
        Self { text, claims }
    }

    /// Build the complete relevance prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(RELEVANCE_INSTRUCTIONS);
        prompt.push_str("\n\nSource text:\n---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\nCandidate claims:\n");
        for (idx, claim) in self.claims.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", idx, claim.text));
        }
        prompt.push('\n');
        prompt.push_str(RELEVANCE_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract the verifiable factual claims from the following text.

Rules:
- Each claim must carry its full context: WHAT happened, WHERE, WHEN, and WHO was involved or reported it.
- Include temporal markers (the date and time of the event) in the claim itself.
- Preserve numbers, names, organizations, and geographic references exactly.
- Phrase each claim as a complete sentence understandable outside the source article.
- Exclude value judgments and opinions; keep only checkable statements.

Example of a BAD extraction (missing context):
"Several earthquakes happened today"

Example of a GOOD extraction (self-contained):
"Several earthquakes occurred on [date] near the Uchan-Su waterfall in Crimea, according to a regional news agency report""#;

const EXTRACTION_FORMAT_REMINDER: &str = r#"Return ONLY JSON, no explanations:
{
  "facts": ["complete claim 1", "complete claim 2"]
}"#;

const RELEVANCE_INSTRUCTIONS: &str = r#"Decide which of the candidate claims are on-topic for the source text.
A claim is on-topic when the source text actually asserts it; drop claims
about unrelated subjects or hallucinated details."#;

const RELEVANCE_FORMAT_REMINDER: &str = r#"Return ONLY JSON with the zero-based indices of the on-topic claims, preserving their order:
{
  "relevant_indices": [0, 2]
}"#;
