//! Progress events emitted during a pipeline run

use std::fmt;

/// One stage transition of a running verification.
///
/// Events are advisory: callers typically surface them as a live status
/// line. Delivery is best-effort and a dropped receiver never affects the
/// run itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// The request passed admission control
    Admitted,

    /// Extracting claims (and analyzing text credibility) from the input
    ExtractingClaims,

    /// Narrowing the claim set to on-topic claims
    FilteringClaims,

    /// Searching for evidence, one query per claim
    GatheringEvidence,

    /// Assessing source quality per claim
    ScoringEvidence,

    /// Cross-checking claims against their evidence
    CrossChecking,

    /// Writing the narrative summary
    SynthesizingReport,

    /// The final report has been assembled
    ReportReady,
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Admitted => "request admitted",
            Self::ExtractingClaims => "extracting claims",
            Self::FilteringClaims => "filtering claims",
            Self::GatheringEvidence => "gathering evidence",
            Self::ScoringEvidence => "scoring sources",
            Self::CrossChecking => "cross-checking claims",
            Self::SynthesizingReport => "writing summary",
            Self::ReportReady => "report ready",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(StageEvent::Admitted.to_string(), "request admitted");
        assert_eq!(StageEvent::ReportReady.to_string(), "report ready");
    }
}
