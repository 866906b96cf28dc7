//! Best-effort syntactic repair of near-valid JSON
//!
//! Handles the small classes of damage models actually produce: trailing
//! separators, payloads cut off mid-string or mid-structure, and stray
//! closing brackets. Anything beyond that stays broken and the caller's
//! fallback applies.

/// Repair a near-valid JSON payload.
///
/// One pass over the text tracking string state and an opener stack:
/// - trailing commas before a closer (or end of input) are dropped
/// - unmatched closing brackets are dropped
/// - an unterminated string is closed
/// - unclosed objects/arrays are closed in nesting order
pub fn repair(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = json.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' => {
                stack.push('}');
                out.push(c);
            }
            '[' => {
                stack.push(']');
                out.push(c);
            }
            '}' | ']' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                    out.push(c);
                }
                // stray closer: drop it
            }
            ',' => {
                // Drop the comma when the next significant char closes a
                // scope or the input ends here.
                let mut lookahead = chars.clone();
                let next = lookahead.find(|ch| !ch.is_whitespace());
                match next {
                    Some('}') | Some(']') | None => {}
                    _ => out.push(c),
                }
            }
            _ => out.push(c),
        }
    }

    if in_string {
        out.push('"');
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
