//! Tolerant JSON extraction for model output.
//!
//! Models asked for bare JSON still wrap it in prose, code fences, or
//! leave trailing commas. These helpers pull a usable object out of such
//! replies; callers decide what a `None` costs.

use serde_json::Value;

/// Parse a reply that should be a bare JSON object. Falls back to
/// slicing between the first `{` and the last `}` when surrounding
/// prose sneaks in.
pub fn parse_json_block(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let sliced = slice_braces(trimmed)?;
    serde_json::from_str(sliced).ok()
}

/// Parse with the full repair ladder: drop code fences, direct parse,
/// slice braces, strip trailing commas, parse again.
pub fn parse_json_with_repair(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(cleaned) {
        return Some(value);
    }

    let sliced = slice_braces(cleaned)?;
    let repaired = strip_trailing_commas(sliced.trim());
    serde_json::from_str(&repaired).ok()
}

fn slice_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Remove markdown code fence markers, the `json` language tag included,
/// case-insensitively.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        // Byte comparison: the tag is ASCII, so a match always leaves `i`
        // on a char boundary.
        if rest.len() >= 7 && rest.as_bytes()[..7].eq_ignore_ascii_case(b"```json") {
            i += 7;
            continue;
        }
        if rest.starts_with("```") {
            i += 3;
            continue;
        }
        match rest.chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

/// Drop commas that sit directly before a closing `]` or `}`. Naive
/// about string contents: a literal `,}` inside a string value gets
/// dropped too.
pub fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch == ',' {
            let next = chars[i + 1..].iter().copied().find(|c| !c.is_whitespace());
            if matches!(next, Some(']' | '}')) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}
