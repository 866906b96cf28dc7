//! Assessment types produced by the scoring and cross-checking stages
//!
//! Every type here has a documented fallback constructor. A stage that
//! fails internally returns the fallback of its success shape, so the
//! pipeline never sees an absent or untyped result.

use crate::claim::Claim;
use crate::evidence::SourceRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Neutral credibility score used when textual analysis fails
pub const NEUTRAL_CREDIBILITY_SCORE: u8 = 50;

/// Guarded-neutral reliability used when source assessment fails for a claim
pub const GUARDED_RELIABILITY_SCORE: u8 = 30;

/// Fixed low overall score when cross-checking fails entirely
pub const CROSSCHECK_FAILURE_SCORE: u8 = 20;

/// Quality assessment of the evidence gathered for one claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimQuality {
    /// The assessed claim
    pub claim: Claim,

    /// Source reliability, 0-100
    pub reliability_score: u8,

    /// Number of real sources considered
    pub sources_count: usize,

    /// Whether any source is an authoritative outlet or organization
    pub authoritative_sources: bool,

    /// Short description of inter-source consensus
    pub consensus: String,

    /// Most relevant source, when one exists
    pub top_source: Option<SourceRecord>,
}

impl ClaimQuality {
    /// Assessment for a claim with no real sources: reliability is zero
    pub fn no_sources(claim: Claim) -> Self {
        Self {
            claim,
            reliability_score: 0,
            sources_count: 0,
            authoritative_sources: false,
            consensus: "no data".to_string(),
            top_source: None,
        }
    }

    /// Fallback when the assessment itself failed: guarded-neutral score,
    /// counts preserved from the bundle
    pub fn undetermined(claim: Claim, sources_count: usize) -> Self {
        Self {
            claim,
            reliability_score: GUARDED_RELIABILITY_SCORE,
            sources_count,
            authoritative_sources: false,
            consensus: "undetermined".to_string(),
            top_source: None,
        }
    }
}

/// How well a claim matched its evidence bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    /// Evidence fully supports the claim
    Confirmed,

    /// Evidence supports parts of the claim
    PartiallyConfirmed,

    /// Evidence neither supports nor refutes the claim
    #[default]
    NotConfirmed,

    /// Evidence contradicts the claim
    Contradicts,
}

impl ConfirmationStatus {
    /// Parse a status leniently from free-form model output.
    ///
    /// Accepts underscores or spaces, any casing, and falls back to
    /// `NotConfirmed` for anything unrecognized.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "confirmed" => Self::Confirmed,
            "partially_confirmed" | "partial" => Self::PartiallyConfirmed,
            "contradicts" | "contradicted" | "contradicts_sources" => Self::Contradicts,
            _ => Self::NotConfirmed,
        }
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirmed => "confirmed",
            Self::PartiallyConfirmed => "partially confirmed",
            Self::NotConfirmed => "not confirmed",
            Self::Contradicts => "contradicts sources",
        };
        write!(f, "{}", label)
    }
}

/// Cross-check verdict for one claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossCheckResult {
    /// The checked claim
    pub claim: Claim,

    /// Confirmation classification
    pub confirmation_status: ConfirmationStatus,

    /// Accuracy of the claim's wording relative to the sources
    pub accuracy_level: String,

    /// Whether the claim presents its fact in complete context
    pub context_completeness: String,

    /// Whether temporal markers match the sources
    pub temporal_accuracy: String,

    /// Confidence in this verdict, 0-100
    pub confidence_score: u8,

    /// Short explanation of the verdict
    pub explanation: String,
}

impl CrossCheckResult {
    /// Verdict for a claim whose evidence is placeholder-only
    pub fn unsupported(claim: Claim) -> Self {
        Self {
            claim,
            confirmation_status: ConfirmationStatus::NotConfirmed,
            accuracy_level: "not assessed".to_string(),
            context_completeness: "not assessed".to_string(),
            temporal_accuracy: "not assessed".to_string(),
            confidence_score: 0,
            explanation: "no supporting sources were found".to_string(),
        }
    }

    /// Synthetic verdict emitted when the whole cross-check failed
    pub fn check_failed() -> Self {
        Self {
            claim: Claim::new("cross-check error"),
            confirmation_status: ConfirmationStatus::NotConfirmed,
            accuracy_level: "undetermined".to_string(),
            context_completeness: "undetermined".to_string(),
            temporal_accuracy: "undetermined".to_string(),
            confidence_score: 0,
            explanation: "an error occurred while cross-checking the claims".to_string(),
        }
    }
}

/// Full cross-check output for a claim set
#[derive(Debug, Clone, Serialize)]
pub struct CrossCheckReport {
    /// One verdict per checked claim; never empty
    pub results: Vec<CrossCheckResult>,

    /// Overall claim/evidence agreement, 0-100
    pub overall_score: u8,

    /// Overall assessment text
    pub overall_assessment: String,
}

impl CrossCheckReport {
    /// Report emitted when cross-checking failed entirely: one synthetic
    /// error result and a fixed low score
    pub fn check_failed() -> Self {
        Self {
            results: vec![CrossCheckResult::check_failed()],
            overall_score: CROSSCHECK_FAILURE_SCORE,
            overall_assessment: "cross-checking could not be completed".to_string(),
        }
    }
}

/// Credibility assessment of the source text itself, independent of any
/// gathered evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextCredibility {
    /// Internal credibility score, 0-100
    pub credibility_score: u8,

    /// Neutral vs. manipulative language
    pub language_assessment: String,

    /// Internal logical consistency
    pub internal_consistency: String,

    /// Presence of concrete dates, names, figures
    pub specificity: String,

    /// Quality of sources cited within the text
    pub sources_cited: String,

    /// Balance of viewpoints
    pub balance: String,

    /// Signs of manipulation or emotional steering
    pub manipulation_signals: String,

    /// Short overall conclusion
    pub conclusion: String,
}

impl TextCredibility {
    /// Full-shape neutral default used when the analysis fails
    pub fn neutral() -> Self {
        Self {
            credibility_score: NEUTRAL_CREDIBILITY_SCORE,
            language_assessment: "not assessed".to_string(),
            internal_consistency: "not assessed".to_string(),
            specificity: "not assessed".to_string(),
            sources_cited: "not assessed".to_string(),
            balance: "not assessed".to_string(),
            manipulation_signals: "not assessed".to_string(),
            conclusion: "the text could not be analyzed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_canonical() {
        assert_eq!(
            ConfirmationStatus::parse("confirmed"),
            ConfirmationStatus::Confirmed
        );
        assert_eq!(
            ConfirmationStatus::parse("partially_confirmed"),
            ConfirmationStatus::PartiallyConfirmed
        );
        assert_eq!(
            ConfirmationStatus::parse("contradicts"),
            ConfirmationStatus::Contradicts
        );
    }

    #[test]
    fn test_status_parse_lenient() {
        assert_eq!(
            ConfirmationStatus::parse("Partially Confirmed"),
            ConfirmationStatus::PartiallyConfirmed
        );
        assert_eq!(
            ConfirmationStatus::parse("CONTRADICTS SOURCES"),
            ConfirmationStatus::Contradicts
        );
    }

    #[test]
    fn test_status_parse_unknown_defaults() {
        assert_eq!(
            ConfirmationStatus::parse("maybe?"),
            ConfirmationStatus::NotConfirmed
        );
        assert_eq!(ConfirmationStatus::parse(""), ConfirmationStatus::NotConfirmed);
    }

    #[test]
    fn test_no_sources_quality_is_zero() {
        let quality = ClaimQuality::no_sources(Claim::new("x"));
        assert_eq!(quality.reliability_score, 0);
        assert_eq!(quality.sources_count, 0);
        assert!(quality.top_source.is_none());
    }

    #[test]
    fn test_unsupported_crosscheck_is_zero_confidence() {
        let result = CrossCheckResult::unsupported(Claim::new("x"));
        assert_eq!(result.confidence_score, 0);
        assert_eq!(result.confirmation_status, ConfirmationStatus::NotConfirmed);
    }

    #[test]
    fn test_failed_report_is_never_empty() {
        let report = CrossCheckReport::check_failed();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.overall_score, CROSSCHECK_FAILURE_SCORE);
    }

    #[test]
    fn test_neutral_credibility() {
        let credibility = TextCredibility::neutral();
        assert_eq!(credibility.credibility_score, NEUTRAL_CREDIBILITY_SCORE);
    }
}
