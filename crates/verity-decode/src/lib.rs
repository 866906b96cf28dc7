//! Verity Structured Decoder
//!
//! Converts unreliable free-text model output into typed data without ever
//! failing the caller. Model responses are expected to embed one structured
//! JSON payload, possibly wrapped in code fences, preceded or followed by
//! commentary, or damaged in small syntactic ways.
//!
//! # Decode path
//!
//! 1. Sanitize: strip `<think>…</think>` spans, markdown code fences, and
//!    any commentary outside the outermost `{…}`/`[…]`.
//! 2. Strict parse via `serde_json`.
//! 3. On failure, run a best-effort syntactic repair (drop trailing
//!    separators, close unterminated strings, balance brackets) and reparse.
//! 4. [`decode_or`] returns a caller-supplied fallback on total failure;
//!    it never returns an error and never panics.
//!
//! Every downstream stage depends on that last guarantee.

#![warn(missing_docs)]

mod repair;

pub use repair::repair;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a strict decode attempt
#[derive(Error, Debug)]
pub enum DecodeError {
    /// No structural payload could be located in the text
    #[error("no structured payload found in response")]
    NoPayload,

    /// The payload failed to parse, even after repair
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Decode a typed value from raw model output.
///
/// Applies sanitization, a strict parse, and one repair-and-reparse pass.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let payload = extract_payload(raw).ok_or(DecodeError::NoPayload)?;

    match serde_json::from_str(&payload) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            debug!("strict parse failed ({}), attempting repair", strict_err);
            let repaired = repair(&payload);
            serde_json::from_str(&repaired).map_err(DecodeError::from)
        }
    }
}

/// Decode a typed value, degrading to `fallback` on any failure.
///
/// This is the boundary the pipeline relies on: it always yields a typed
/// value of the success shape.
pub fn decode_or<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    match decode(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("structured decode failed, using fallback: {}", e);
            fallback
        }
    }
}

/// Locate the structural payload inside raw model output.
///
/// Strips think-tag spans and fence markers, then slices from the first
/// opening brace/bracket to the last closing one. Returns `None` when no
/// opener exists at all.
fn extract_payload(raw: &str) -> Option<String> {
    let without_thinking = strip_thinking(raw);
    let unfenced = strip_fences(&without_thinking);

    let start = unfenced.find(['{', '['])?;
    // Slice up to the last closer when one exists; the repair pass will
    // rebalance payloads that were cut off mid-document.
    let end = unfenced.rfind(['}', ']']).map(|i| i + 1).unwrap_or(unfenced.len());
    if end <= start {
        return Some(unfenced[start..].to_string());
    }
    Some(unfenced[start..end].to_string())
}

/// Remove `<think>…</think>` spans some models emit before their answer.
/// An unterminated span swallows the rest of the text.
///
/// Public because free-text consumers (report synthesis) need the same
/// sanitation without the JSON extraction step.
pub fn strip_thinking(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("<think>") {
        out.push_str(&rest[..open]);
        match rest[open..].find("</think>") {
            Some(close) => rest = &rest[open + close + "</think>".len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Strip markdown code-fence markers, keeping the fenced content
fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.contains("```") {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}
