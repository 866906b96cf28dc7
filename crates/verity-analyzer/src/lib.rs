//! Verity Analyzer
//!
//! The evidence-consuming stages of the pipeline:
//!
//! - `EvidenceGatherer`: one search per claim, ordered, bounded in-flight
//! - `QualityScorer`: per-claim source reliability assessment
//! - `CrossChecker`: claim/evidence agreement with its own relevance gate
//! - `TextCredibilityAnalyzer`: internal credibility of the source text
//!
//! Every component degrades to a full-shape typed fallback; none of them
//! can fail the pipeline.

#![warn(missing_docs)]

mod credibility;
mod crosscheck;
mod gatherer;
mod quality;

pub use credibility::TextCredibilityAnalyzer;
pub use crosscheck::CrossChecker;
pub use gatherer::EvidenceGatherer;
pub use quality::QualityScorer;

/// Clamp a model-reported score into the 0-100 range
pub(crate) fn clamp_score(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(50), 50);
        assert_eq!(clamp_score(400), 100);
    }
}
