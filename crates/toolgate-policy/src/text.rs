// text.rs — Canonical text helpers shared by condition and heuristic checks.
//
// Every check that looks at the freeform `args` value sees the same
// canonical serialization, so a pattern that matches in one check matches
// in all of them.

use std::collections::HashSet;

/// Cap applied to serialized arguments before heuristic scanning.
/// Bounds the worst-case cost of a single evaluation; anything past the
/// cap is invisible to the pattern detectors.
pub const MAX_SCAN_LENGTH: usize = 100_000;

/// Normalize a tool name for comparison: trimmed, lowercase.
pub fn normalize_tool_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Serialize a JSON value to its compact canonical form.
///
/// Serialization of a `serde_json::Value` cannot realistically fail, but
/// the checks treat the empty string as "nothing to match" rather than
/// erroring, so the fallback is harmless either way.
pub fn canonical_text(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Canonical serialization truncated to [`MAX_SCAN_LENGTH`] characters.
pub fn scan_text(value: &serde_json::Value) -> String {
    truncate_chars(canonical_text(value), MAX_SCAN_LENGTH)
}

/// Truncate a string to at most `max` characters (not bytes), respecting
/// char boundaries.
pub fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

/// Split text into a lowercase word-set, dropping tokens of length <= 2.
///
/// Separators cover whitespace plus the punctuation that shows up inside
/// tool names, paths, and serialized JSON.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(is_token_separator)
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '-' | '_' | '/' | '.' | ':' | ';' | ',' | '!' | '?' | '(' | ')' | '{' | '}' | '['
                | ']' | '"' | '\''
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_tool_name("  System.Run  "), "system.run");
        assert_eq!(normalize_tool_name(""), "");
    }

    #[test]
    fn canonical_text_is_compact_json() {
        let value = json!({"cmd": "ls", "force": true});
        let text = canonical_text(&value);
        assert!(text.contains("\"cmd\":\"ls\""));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn canonical_text_of_null() {
        assert_eq!(canonical_text(&serde_json::Value::Null), "null");
    }

    #[test]
    fn truncate_keeps_exact_cap() {
        let s = "a".repeat(10);
        assert_eq!(truncate_chars(s.clone(), 10), s);
    }

    #[test]
    fn truncate_drops_past_cap() {
        let s = "a".repeat(11);
        assert_eq!(truncate_chars(s, 10).len(), 10);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "héllo wörld".to_string();
        let out = truncate_chars(s, 4);
        assert_eq!(out, "héll");
    }

    #[test]
    fn tokenize_splits_on_punctuation_and_drops_short_tokens() {
        let tokens = tokenize("Restart the auth-service per ticket OPS/1234");
        assert!(tokens.contains("restart"));
        assert!(tokens.contains("auth"));
        assert!(tokens.contains("service"));
        assert!(tokens.contains("1234"));
        // "the" survives (3 chars); "per" survives; two-char tokens do not.
        assert!(!tokens.contains("to"));
    }

    #[test]
    fn tokenize_handles_serialized_json() {
        let tokens = tokenize(&canonical_text(&json!({"unit": "auth-service"})));
        assert!(tokens.contains("unit"));
        assert!(tokens.contains("auth"));
        assert!(tokens.contains("service"));
    }
}
