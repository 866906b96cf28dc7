//! The multi-stage verification pipeline

use crate::{PipelineConfig, StageEvent};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};
use verity_analyzer::{CrossChecker, EvidenceGatherer, QualityScorer, TextCredibilityAnalyzer};
use verity_domain::text::{char_len, clip};
use verity_domain::traits::{LlmProvider, SearchBackend};
use verity_extractor::{ClaimExtractor, RelevanceFilter};
use verity_gatekeeper::RateLimiter;
use verity_report::{sections, ReportAssembler, ReportSynthesizer};
use verity_search::SearchClient;

/// Why a request was turned away before any stage ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The input contained no text after trimming
    EmptyInput,

    /// The identity exhausted its admission window
    RateLimited,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyInput => "the text to check is empty",
            Self::RateLimited => "request limit reached, try again later",
        };
        write!(f, "{}", label)
    }
}

/// Terminal outcome of one verification request
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The full report text, bounded to the configured length
    Completed(String),

    /// The request was turned away before any stage ran
    Rejected(RejectReason),

    /// The run task panicked or was cancelled
    Failed(String),
}

/// A fully wired verification pipeline.
///
/// Generic over the inference provider and the search transport; one
/// instance is shared across all requesters and owns the rate limiter,
/// which is the only cross-request state.
pub struct Pipeline<L, S> {
    limiter: RateLimiter,
    extractor: ClaimExtractor<L>,
    relevance: RelevanceFilter<L>,
    credibility: TextCredibilityAnalyzer<L>,
    gatherer: EvidenceGatherer<S>,
    scorer: QualityScorer<L>,
    checker: CrossChecker<L>,
    synthesizer: ReportSynthesizer<L>,
    assembler: ReportAssembler,
    max_input_chars: usize,
}

impl<L, S> Pipeline<L, S>
where
    L: LlmProvider + 'static,
    S: SearchBackend + 'static,
{
    /// Wire a pipeline from its two transports and a configuration
    pub fn new(llm: Arc<L>, backend: S, config: PipelineConfig) -> Self {
        let search = Arc::new(SearchClient::new(backend, config.search));
        Self {
            limiter: RateLimiter::new(config.limiter),
            extractor: ClaimExtractor::new(Arc::clone(&llm), config.extractor),
            relevance: RelevanceFilter::new(Arc::clone(&llm)),
            credibility: TextCredibilityAnalyzer::new(Arc::clone(&llm)),
            gatherer: EvidenceGatherer::new(search, config.evidence_concurrency),
            scorer: QualityScorer::new(Arc::clone(&llm)),
            checker: CrossChecker::new(Arc::clone(&llm)),
            synthesizer: ReportSynthesizer::new(llm),
            assembler: ReportAssembler::new(config.report_max_chars),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Requests the identity may still issue within the current window
    pub fn remaining_quota(&self, identity: &str) -> usize {
        self.limiter.remaining(identity)
    }

    /// Run one verification request end to end.
    ///
    /// Progress events are sent on `progress` when provided; a dropped
    /// receiver is ignored. Past admission this cannot fail: every stage
    /// degrades internally, so the outcome is always a completed report.
    pub async fn run(
        &self,
        identity: &str,
        text: &str,
        progress: Option<UnboundedSender<StageEvent>>,
    ) -> PipelineOutcome {
        let text = clip(text.trim(), self.max_input_chars);
        if text.is_empty() {
            return PipelineOutcome::Rejected(RejectReason::EmptyInput);
        }

        if !self.limiter.admit(identity) {
            info!("Request from '{}' rejected by rate limiter", identity);
            return PipelineOutcome::Rejected(RejectReason::RateLimited);
        }
        emit(&progress, StageEvent::Admitted);
        info!(
            "Verification started for '{}' ({} chars)",
            identity,
            char_len(&text)
        );

        emit(&progress, StageEvent::ExtractingClaims);
        let (claims, credibility) =
            tokio::join!(self.extractor.extract(&text), self.credibility.analyze(&text));

        emit(&progress, StageEvent::FilteringClaims);
        let claims = self.relevance.filter(&text, &claims).await;

        emit(&progress, StageEvent::GatheringEvidence);
        let bundle = self.gatherer.gather(&claims).await;

        emit(&progress, StageEvent::ScoringEvidence);
        emit(&progress, StageEvent::CrossChecking);
        let (qualities, cross_check) = tokio::join!(
            self.scorer.score(&bundle),
            self.checker.check(&text, &claims, &bundle)
        );

        emit(&progress, StageEvent::SynthesizingReport);
        let summary = self
            .synthesizer
            .synthesize(&text, &credibility, &qualities, &cross_check, &bundle)
            .await;

        let report = self.assembler.assemble(&[
            &summary,
            &sections::cross_check_section(&cross_check),
            &sections::sources_section(&bundle),
        ]);

        emit(&progress, StageEvent::ReportReady);
        info!("Verification finished for '{}'", identity);
        PipelineOutcome::Completed(report)
    }

    /// Run inside a spawned task so a panicking stage cannot unwind the
    /// caller; the panic surfaces as [`PipelineOutcome::Failed`].
    pub async fn run_guarded(
        self: Arc<Self>,
        identity: impl Into<String>,
        text: impl Into<String>,
        progress: Option<UnboundedSender<StageEvent>>,
    ) -> PipelineOutcome {
        let identity = identity.into();
        let text = text.into();
        let task =
            tokio::spawn(async move { self.run(&identity, &text, progress).await });
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Pipeline task aborted: {}", e);
                PipelineOutcome::Failed(e.to_string())
            }
        }
    }
}

fn emit(progress: &Option<UnboundedSender<StageEvent>>, event: StageEvent) {
    if let Some(tx) = progress {
        // Receiver may be gone; the run does not care.
        let _ = tx.send(event);
    }
}
