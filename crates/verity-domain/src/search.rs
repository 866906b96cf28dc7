//! Search provider wire documents
//!
//! The query and result documents exchanged with the web search provider.
//! Results may also carry a provider-defined domain error; mapping its code
//! to a user-facing message is the search client's job.

use serde::{Deserialize, Serialize};

/// Structured query document sent to the search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// The claim text to search for
    pub text: String,

    /// Result page, zero-based
    pub page: u32,

    /// Result ordering; the pipeline always asks for relevance order
    pub sort_by: String,

    /// Passages requested per document
    pub max_passages: u32,

    /// Document groups requested per page
    pub groups_on_page: u32,
}

impl SearchQuery {
    /// Build a relevance-ordered first-page query for the given text
    pub fn relevance(text: impl Into<String>, max_passages: u32, groups_on_page: u32) -> Self {
        Self {
            text: text.into(),
            page: 0,
            sort_by: "relevance".to_string(),
            max_passages,
            groups_on_page,
        }
    }
}

/// One document hit in a provider response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderHit {
    /// Document title; providers may omit it
    #[serde(default)]
    pub title: Option<String>,

    /// Document URL; hits without one are unusable
    #[serde(default)]
    pub url: Option<String>,

    /// Relevant passages in relevance order
    #[serde(default)]
    pub passages: Vec<String>,
}

/// Provider-reported domain error with a provider-defined code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Provider error code, e.g. "42"
    pub code: String,

    /// Provider error message
    #[serde(default)]
    pub message: String,
}

/// Structured result document from the search provider.
///
/// A response carries either hits (possibly zero) or a domain error; the
/// error takes precedence when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Domain error reported by the provider, if any
    #[serde(default)]
    pub error: Option<ProviderError>,

    /// Document hits in relevance order
    #[serde(default)]
    pub results: Vec<ProviderHit>,
}
