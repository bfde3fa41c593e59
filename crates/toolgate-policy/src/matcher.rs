// matcher.rs — Resolution of condition operands into concrete pattern lists.
//
// A condition operand is either an inline list of patterns or a single
// string. `"$matchers.<name>"` dereferences the policy document's shared
// matcher dictionary; any other single string is a one-element list.

use std::collections::HashMap;

use crate::model::PatternSource;

/// Prefix marking a reference into [`PolicyDocument::matchers`].
///
/// [`PolicyDocument::matchers`]: crate::model::PolicyDocument::matchers
pub const MATCHER_REF_PREFIX: &str = "$matchers.";

/// Resolve an operand to a concrete pattern list.
///
/// An unresolved reference yields the empty list — for the affirmative
/// matching operators, "matches nothing" is the safe default when a
/// policy document names a matcher set it never defined.
pub fn resolve_patterns(
    source: &PatternSource,
    matchers: &HashMap<String, Vec<String>>,
) -> Vec<String> {
    match source {
        PatternSource::Inline(patterns) => patterns.clone(),
        PatternSource::Single(s) => {
            if let Some(key) = s.strip_prefix(MATCHER_REF_PREFIX) {
                match matchers.get(key) {
                    Some(patterns) => patterns.clone(),
                    None => {
                        tracing::debug!(matcher = key, "unresolved matcher reference");
                        Vec::new()
                    }
                }
            } else {
                vec![s.clone()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers() -> HashMap<String, Vec<String>> {
        let mut m = HashMap::new();
        m.insert(
            "high_risk".to_string(),
            vec!["^system\\.".to_string(), "^deploy\\.".to_string()],
        );
        m
    }

    #[test]
    fn inline_list_passes_through() {
        let source = PatternSource::Inline(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(resolve_patterns(&source, &matchers()), vec!["a", "b"]);
    }

    #[test]
    fn reference_resolves_against_dictionary() {
        let source = PatternSource::Single("$matchers.high_risk".to_string());
        assert_eq!(
            resolve_patterns(&source, &matchers()),
            vec!["^system\\.", "^deploy\\."]
        );
    }

    #[test]
    fn missing_reference_yields_empty_list() {
        let source = PatternSource::Single("$matchers.undefined_set".to_string());
        assert!(resolve_patterns(&source, &matchers()).is_empty());
    }

    #[test]
    fn plain_string_is_single_element_list() {
        let source = PatternSource::Single("^fs\\.".to_string());
        assert_eq!(resolve_patterns(&source, &matchers()), vec!["^fs\\."]);
    }
}
