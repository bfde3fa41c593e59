// condition.rs — Evaluation of a rule's `when` clause.
//
// Combination contract: with both groups present, the rule matches only
// when at least one `any` expression is true AND every `all` expression
// is true. An empty group is vacuously true; no condition at all means
// the rule always applies.

use std::collections::HashMap;

use regex::RegexBuilder;

use crate::matcher::resolve_patterns;
use crate::model::{ConditionExpr, EvaluationInput, RuleCondition};
use crate::text::{canonical_text, normalize_tool_name};

/// Evaluate a rule condition against an input. Deterministic and
/// side-effect-free; `None` always matches.
pub fn condition_matches(
    cond: Option<&RuleCondition>,
    input: &EvaluationInput,
    matchers: &HashMap<String, Vec<String>>,
) -> bool {
    let cond = match cond {
        Some(c) => c,
        None => return true,
    };

    if !cond.any.is_empty() {
        let any_match = cond.any.iter().any(|e| expr_matches(e, input, matchers));
        if !cond.all.is_empty() {
            return any_match && cond.all.iter().all(|e| expr_matches(e, input, matchers));
        }
        return any_match;
    }

    if !cond.all.is_empty() {
        return cond.all.iter().all(|e| expr_matches(e, input, matchers));
    }

    // Empty condition object — does not constrain the match.
    true
}

fn expr_matches(
    expr: &ConditionExpr,
    input: &EvaluationInput,
    matchers: &HashMap<String, Vec<String>>,
) -> bool {
    match expr {
        ConditionExpr::ToolNameMatchesAny(source) => {
            let patterns = resolve_patterns(source, matchers);
            matches_any_pattern(&normalize_tool_name(&input.tool), &patterns)
        }
        ConditionExpr::ArgsContainAnyKeys(source) => {
            let keys = resolve_patterns(source, matchers);
            args_contain_any_keys(&input.args, &keys)
        }
        ConditionExpr::ArgsContainAnyValues(source) => {
            let tokens = resolve_patterns(source, matchers);
            args_contain_any_values(&input.args, &tokens)
        }
    }
}

/// Case-insensitive regex match of `value` against any pattern.
///
/// A pattern that fails to compile never matches (fail-open on the
/// pattern, fail-closed on the rule: the rule simply does not apply).
fn matches_any_pattern(value: &str, patterns: &[String]) -> bool {
    if value.is_empty() || patterns.is_empty() {
        return false;
    }
    patterns.iter().any(|p| {
        match RegexBuilder::new(p).case_insensitive(true).build() {
            Ok(re) => re.is_match(value),
            Err(_) => {
                tracing::debug!(pattern = %p, "invalid condition pattern, treated as non-matching");
                false
            }
        }
    })
}

/// Case-insensitive membership test over the top-level argument keys.
/// Non-object arguments have no keys and never match.
fn args_contain_any_keys(args: &serde_json::Value, keys: &[String]) -> bool {
    let map = match args.as_object() {
        Some(m) if !keys.is_empty() => m,
        _ => return false,
    };
    let arg_keys: Vec<String> = map.keys().map(|k| k.to_lowercase()).collect();
    keys.iter()
        .any(|k| arg_keys.contains(&k.to_lowercase()))
}

/// Case-insensitive substring search over the canonical serialization of
/// the arguments.
fn args_contain_any_values(args: &serde_json::Value, tokens: &[String]) -> bool {
    if args.is_null() || tokens.is_empty() {
        return false;
    }
    let haystack = canonical_text(args).to_lowercase();
    tokens.iter().any(|t| haystack.contains(&t.to_lowercase()))
}
