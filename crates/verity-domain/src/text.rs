//! Shared length budgeting for user-facing text
//!
//! Every field-level cap in the pipeline goes through [`clip`] so truncation
//! is char-safe (never splits a UTF-8 scalar) and applied uniformly rather
//! than scattered through formatting code.

/// Clip a string to at most `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte text (Cyrillic, CJK) is
/// never cut mid-scalar. Returns the input unchanged when it fits.
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Number of characters in a string (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
