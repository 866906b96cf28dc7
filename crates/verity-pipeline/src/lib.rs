//! Verity Pipeline
//!
//! The assembly point of the verification system: admission control,
//! claim extraction, evidence gathering, scoring, cross-checking, and
//! report assembly wired into one multi-stage run.
//!
//! # Failure model
//!
//! Only admission can reject a request. Every stage past admission is
//! infallible at its boundary (it degrades to a typed fallback instead of
//! erroring), so an admitted request always produces a report. A stray
//! panic inside a stage is contained by [`Pipeline::run_guarded`], which
//! maps it to [`PipelineOutcome::Failed`] rather than unwinding the caller.
//!
//! # Stage layout
//!
//! ```text
//! input ─ admit ─┬─ extract claims ──filter──┐
//!                └─ text credibility ─────┐  │
//!                        gather evidence ◄┼──┘
//!                ┌─ score sources ◄───────┤
//!                └─ cross-check ◄─────────┘
//!                        synthesize ── assemble ── report
//! ```
//!
//! Extraction runs concurrently with the credibility analysis, and source
//! scoring runs concurrently with the cross-check; neither pair shares data.

#![warn(missing_docs)]

mod config;
mod event;
mod pipeline;

pub use config::PipelineConfig;
pub use event::StageEvent;
pub use pipeline::{Pipeline, PipelineOutcome, RejectReason};
