//! Evidence types - source records and per-claim bundles

use crate::claim::Claim;
use crate::text::clip;
use serde::{Deserialize, Serialize};

/// Maximum characters kept from a source title
pub const MAX_TITLE_CHARS: usize = 250;

/// Maximum characters kept from a source snippet
pub const MAX_SNIPPET_CHARS: usize = 500;

/// One external document summary supporting or refuting a claim.
///
/// Placeholder records (no real hit behind them) carry an empty `url` and
/// an explanatory title/snippet; a list of records handed to downstream
/// stages is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Document title, capped at [`MAX_TITLE_CHARS`]
    pub title: String,

    /// Document URL; empty for placeholder records
    pub url: String,

    /// Extracted passage text, capped at [`MAX_SNIPPET_CHARS`]
    pub snippet: String,
}

impl SourceRecord {
    /// Create a record from a real search hit, applying the field caps
    pub fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: clip(title, MAX_TITLE_CHARS),
            url: url.to_string(),
            snippet: clip(snippet, MAX_SNIPPET_CHARS),
        }
    }

    /// Create a placeholder record with explanatory title/snippet
    pub fn placeholder(title: &str, snippet: &str) -> Self {
        Self {
            title: clip(title, MAX_TITLE_CHARS),
            url: String::new(),
            snippet: clip(snippet, MAX_SNIPPET_CHARS),
        }
    }

    /// Whether this record stands in for an absent real hit
    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty()
    }
}

/// One claim together with the sources gathered for it
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceEntry {
    /// The claim under verification
    pub claim: Claim,

    /// Sources in provider relevance order; never empty
    pub sources: Vec<SourceRecord>,
}

/// Ordered mapping of claim → gathered sources.
///
/// Insertion order is preserved: it matches both the extraction order of
/// the claims and the provider relevance order within each entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvidenceBundle {
    entries: Vec<EvidenceEntry>,
}

impl EvidenceBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the sources gathered for one claim
    pub fn insert(&mut self, claim: Claim, sources: Vec<SourceRecord>) {
        self.entries.push(EvidenceEntry { claim, sources });
    }

    /// Sources for a specific claim, if present
    pub fn get(&self, claim: &Claim) -> Option<&[SourceRecord]> {
        self.entries
            .iter()
            .find(|e| &e.claim == claim)
            .map(|e| e.sources.as_slice())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.iter()
    }

    /// Number of claims in the bundle
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle holds no claims
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total real (non-placeholder) sources across all claims
    pub fn total_real_sources(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.sources.iter().filter(|s| !s.is_placeholder()).count())
            .sum()
    }

    /// Number of claims with at least one real source
    pub fn claims_with_sources(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sources.iter().any(|s| !s.is_placeholder()))
            .count()
    }
}
