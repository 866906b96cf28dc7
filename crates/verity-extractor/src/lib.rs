//! Verity Extractor
//!
//! Derives a bounded set of self-contained, checkable claims from free-form
//! text, and narrows them to the ones on-topic for that text.
//!
//! # Architecture
//!
//! ```text
//! Text → ClaimExtractor → LLM → StructuredDecoder → Vec<Claim> (≤ max)
//!             ↓
//!       RelevanceFilter → LLM → index list → on-topic subset
//! ```
//!
//! Both components are infallible at their boundary: extraction degrades to
//! an empty claim list, filtering degrades to the original unfiltered list
//! (over-inclusion is preferred to losing claims).

#![warn(missing_docs)]

mod config;
mod extractor;
mod prompt;
mod relevance;

pub use config::ExtractorConfig;
pub use extractor::ClaimExtractor;
pub use relevance::RelevanceFilter;
