//! Verity Domain Layer
//!
//! Core types and trait seams for the verification pipeline. Everything in
//! this crate is created per-request, held for the duration of that request,
//! and discarded once the report is produced.
//!
//! ## Key Concepts
//!
//! - **Claim**: a self-contained, checkable statement extracted from text
//! - **SourceRecord**: one external document summary (title, url, snippet)
//! - **EvidenceBundle**: ordered claim → sources mapping
//! - **Assessments**: quality, cross-check, and textual credibility results
//!
//! ## Architecture
//!
//! Trait definitions for all external interactions live here; the
//! infrastructure implementations live in other crates (`verity-llm`,
//! `verity-search`). Every assessment type has a documented fallback
//! constructor so stages can degrade without changing shape.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assessment;
pub mod claim;
pub mod evidence;
pub mod search;
pub mod text;
pub mod traits;

// Re-exports for convenience
pub use assessment::{
    ClaimQuality, ConfirmationStatus, CrossCheckReport, CrossCheckResult, TextCredibility,
    CROSSCHECK_FAILURE_SCORE, GUARDED_RELIABILITY_SCORE, NEUTRAL_CREDIBILITY_SCORE,
};
pub use claim::Claim;
pub use evidence::{EvidenceBundle, SourceRecord};
pub use search::{ProviderError, ProviderHit, ProviderResponse, SearchQuery};
