//! Verity Search Layer
//!
//! Wraps the web search provider behind the `SearchBackend` seam and turns
//! every possible outcome into a non-empty list of `SourceRecord`s:
//!
//! - transport failure → one "temporarily unavailable" placeholder
//! - provider domain error → one placeholder with the catalogued message
//! - zero hits → one "no information found" placeholder naming the query
//! - hits → up to `max_results` normalized, field-capped records
//!
//! The client never returns an error to the pipeline: a search that cannot
//! be completed degrades, it does not abort the claim it serves.

#![warn(missing_docs)]

mod backend;
mod client;
mod config;

pub use backend::{HttpBackend, MockBackend};
pub use client::SearchClient;
pub use config::SearchConfig;

use thiserror::Error;

/// Transport-level search failures
///
/// These never cross the `SearchClient` boundary; they are mapped to
/// placeholder records inside the client.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Network or HTTP-level failure (includes timeouts)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body failed to parse as a result document
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
