//! Claim module - the unit of verification

use serde::{Deserialize, Serialize};
use std::fmt;

/// A claim - one self-contained, checkable statement.
///
/// A claim carries its own context (who/what/where/when) so it can be
/// verified without the surrounding article. Claims are immutable once
/// extracted; the pipeline never rewrites them between stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// The statement text
    pub text: String,
}

impl Claim {
    /// Create a claim from statement text, trimming surrounding whitespace
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    /// Whether the claim carries any content at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
