//! Verity Report Layer
//!
//! Turns the accumulated stage outputs into the final user-facing text:
//!
//! - `ReportSynthesizer`: LLM-written narrative summary, with a fixed
//!   apology fallback
//! - `sections`: deterministic formatters for the cross-check verdicts and
//!   the per-claim source listings
//! - `ReportAssembler`: joins the parts and enforces the transport length
//!   bound with head/tail truncation
//!
//! Like every other stage, nothing here can fail the pipeline: the worst
//! outcome is a report built entirely from deterministic sections.

#![warn(missing_docs)]

mod assembler;
pub mod sections;
mod synthesizer;

pub use assembler::{ReportAssembler, TRUNCATION_MARKER};
pub use synthesizer::{ReportSynthesizer, SYNTHESIS_APOLOGY};
