// model.rs — Policy document and evaluation value types.
//
// These are the passive data shapes shared between the YAML policy
// document, the rule engine, and callers. The document is loaded once
// and treated as immutable; evaluation inputs and results are built
// fresh per call.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The five possible verdicts a policy evaluation can produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Proceed with the invocation as requested.
    Allow,
    /// Proceed, but the caller is expected to apply the stated changes first.
    AllowWithChanges,
    /// Pause and ask the operator before proceeding.
    AskUser,
    /// Do not proceed.
    Deny,
    /// Hand the request to a higher-authority reviewer.
    Escalate,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Decision::Allow => "allow",
            Decision::AllowWithChanges => "allow_with_changes",
            Decision::AskUser => "ask_user",
            Decision::Deny => "deny",
            Decision::Escalate => "escalate",
        };
        write!(f, "{}", s)
    }
}

/// Risk tier a rule belongs to. Informational metadata — the evaluation
/// algorithm never branches on it, but audit consumers do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    T0,
    T1,
    T2,
    T3,
}

/// Per-tier configuration. Currently just a human-readable friction
/// descriptor (e.g., "none", "ask + rollback plan").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierConfig {
    pub friction: String,
}

/// The root policy document.
///
/// ```yaml
/// version: "1"
/// name: "toolgate default policy"
/// default_decision: allow
/// tiers:
///   T0: { friction: "none" }
///   T3: { friction: "explicit consent + rollback plan" }
/// matchers:
///   high_risk_tools: ["^system\\.", "^deploy\\."]
/// rules:
///   - id: baseline-reason
///     tier: T0
///     require: [reason_present]
///     on_fail: { decision: ask_user, message: "State a reason." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub version: String,
    pub name: String,

    /// Verdict returned when every applicable rule passes.
    pub default_decision: Decision,

    /// Tier name → friction descriptor.
    #[serde(default)]
    pub tiers: BTreeMap<Tier, TierConfig>,

    /// Named, reusable pattern lists referenced from rule conditions
    /// via `$matchers.<name>`.
    #[serde(default)]
    pub matchers: HashMap<String, Vec<String>>,

    /// Evaluated in document order; the first rule whose condition matches
    /// but whose requirements fail decides the verdict.
    pub rules: Vec<PolicyRule>,
}

/// A single policy rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Unique id, reported back in `EvaluationResult::matched_rules`.
    pub id: String,

    /// Risk tier this rule belongs to.
    pub tier: Tier,

    /// Condition gating the rule. Absent → the rule always applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<RuleCondition>,

    /// Requirements the input must satisfy once the condition matches.
    #[serde(default)]
    pub require: Vec<RequirementKey>,

    /// Verdict produced when the condition matches but a requirement fails.
    pub on_fail: RuleVerdict,
}

/// The decision + message a failing rule produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub decision: Decision,
    pub message: String,
}

/// Boolean combination of condition expressions.
///
/// With both groups present, the rule matches only when at least one `any`
/// expression is true AND every `all` expression is true. An empty (or
/// absent) group does not constrain the match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleCondition {
    // singleton_map_recursive makes each expression a single-key map
    // ({tool_name_matches_any: [...]}) instead of a YAML !tag.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub any: Vec<ConditionExpr>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub all: Vec<ConditionExpr>,
}

/// A typed condition expression. Written in policy documents as a
/// single-key map, e.g. `{ tool_name_matches_any: [...] }` — exactly one
/// variant per expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionExpr {
    /// Case-insensitive regex match against the normalized tool name.
    ToolNameMatchesAny(PatternSource),
    /// Case-insensitive match against the top-level argument keys.
    ArgsContainAnyKeys(PatternSource),
    /// Case-insensitive substring search over the serialized arguments.
    ArgsContainAnyValues(PatternSource),
}

/// The operand of a condition expression: an inline pattern list, or a
/// single string. A single string starting with `$matchers.` is a
/// reference into [`PolicyDocument::matchers`]; any other single string
/// is shorthand for a one-element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSource {
    Inline(Vec<String>),
    Single(String),
}

/// A named precondition a rule imposes on an evaluation input.
///
/// Closed set with an `Unknown` escape hatch: policy documents written
/// against a newer requirement vocabulary still parse, and unknown keys
/// evaluate as satisfied (fail-open, see `requirement.rs`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RequirementKey {
    ReasonPresent,
    ExplicitConsent,
    RollbackPlanPresent,
    ChangeTicketPresent,
    ExplicitOverride,
    BindToToolResult,
    AssumptionsLabeled,
    ActionAdvancesReason,
    NoExfiltrationDetected,
    AuthorizedTarget,
    NoSecretEcho,
    NoManipulationDetected,
    /// Any key not in the fixed vocabulary. Preserved verbatim so it
    /// round-trips through serialization.
    Unknown(String),
}

impl RequirementKey {
    /// The snake_case key as written in policy documents.
    pub fn as_str(&self) -> &str {
        match self {
            RequirementKey::ReasonPresent => "reason_present",
            RequirementKey::ExplicitConsent => "explicit_consent",
            RequirementKey::RollbackPlanPresent => "rollback_plan_present",
            RequirementKey::ChangeTicketPresent => "change_ticket_present",
            RequirementKey::ExplicitOverride => "explicit_override",
            RequirementKey::BindToToolResult => "bind_to_tool_result",
            RequirementKey::AssumptionsLabeled => "assumptions_labeled",
            RequirementKey::ActionAdvancesReason => "action_advances_reason",
            RequirementKey::NoExfiltrationDetected => "no_exfiltration_detected",
            RequirementKey::AuthorizedTarget => "authorized_target",
            RequirementKey::NoSecretEcho => "no_secret_echo",
            RequirementKey::NoManipulationDetected => "no_manipulation_detected",
            RequirementKey::Unknown(key) => key,
        }
    }
}

impl From<String> for RequirementKey {
    fn from(key: String) -> Self {
        match key.as_str() {
            "reason_present" => RequirementKey::ReasonPresent,
            "explicit_consent" => RequirementKey::ExplicitConsent,
            "rollback_plan_present" => RequirementKey::RollbackPlanPresent,
            "change_ticket_present" => RequirementKey::ChangeTicketPresent,
            "explicit_override" => RequirementKey::ExplicitOverride,
            "bind_to_tool_result" => RequirementKey::BindToToolResult,
            "assumptions_labeled" => RequirementKey::AssumptionsLabeled,
            "action_advances_reason" => RequirementKey::ActionAdvancesReason,
            "no_exfiltration_detected" => RequirementKey::NoExfiltrationDetected,
            "authorized_target" => RequirementKey::AuthorizedTarget,
            "no_secret_echo" => RequirementKey::NoSecretEcho,
            "no_manipulation_detected" => RequirementKey::NoManipulationDetected,
            _ => RequirementKey::Unknown(key),
        }
    }
}

impl From<RequirementKey> for String {
    fn from(key: RequirementKey) -> Self {
        key.as_str().to_string()
    }
}

impl std::fmt::Display for RequirementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The subject being judged: one proposed tool invocation plus the
/// operator-supplied metadata the requirements inspect. This is the sole
/// input to every check — no hidden state is consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Name of the tool the caller wants to invoke (e.g., "system.run").
    pub tool: String,

    /// Freeform arguments for the tool. `serde_json::Value` holds any
    /// JSON shape; every check sees the same canonical serialization.
    #[serde(default)]
    pub args: serde_json::Value,

    /// Short stated goal for the action.
    #[serde(default)]
    pub reason: Option<String>,

    /// The operator explicitly approved this action.
    #[serde(default)]
    pub explicit_consent: bool,

    /// Rollback plan for high-impact actions.
    #[serde(default)]
    pub rollback_plan: String,

    /// Change-management ticket reference.
    #[serde(default)]
    pub change_ticket: String,

    /// The operator explicitly overrode a softer verdict.
    #[serde(default)]
    pub explicit_override: bool,
}

impl EvaluationInput {
    /// Build a minimal input with just a tool name and arguments.
    pub fn new(tool: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            tool: tool.into(),
            args,
            reason: None,
            explicit_consent: false,
            rollback_plan: String::new(),
            change_ticket: String::new(),
            explicit_override: false,
        }
    }

    /// Set the stated reason and return self (builder pattern).
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// The verdict of one evaluation: decision, message, and the ordered ids
/// of every rule that matched during the walk (all passing rules plus the
/// one terminal failing rule, if any).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub decision: Decision,
    pub message: String,
    pub matched_rules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_serializes_as_snake_case() {
        let json = serde_json::to_string(&Decision::AllowWithChanges).unwrap();
        assert_eq!(json, "\"allow_with_changes\"");
        let json = serde_json::to_string(&Decision::AskUser).unwrap();
        assert_eq!(json, "\"ask_user\"");
    }

    #[test]
    fn decision_display_matches_serde() {
        assert_eq!(Decision::Escalate.to_string(), "escalate");
        assert_eq!(Decision::Allow.to_string(), "allow");
    }

    #[test]
    fn requirement_key_round_trips_known_keys() {
        let key: RequirementKey = serde_json::from_str("\"no_secret_echo\"").unwrap();
        assert_eq!(key, RequirementKey::NoSecretEcho);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"no_secret_echo\"");
    }

    #[test]
    fn requirement_key_preserves_unknown_keys() {
        let key: RequirementKey = serde_json::from_str("\"future_check\"").unwrap();
        assert_eq!(key, RequirementKey::Unknown("future_check".to_string()));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"future_check\"");
    }

    #[test]
    fn condition_expr_yaml_shape() {
        let yaml = r#"
any:
  - tool_name_matches_any:
      - "^system\\."
"#;
        let cond: RuleCondition = serde_yaml::from_str(yaml).unwrap();
        match cond.any.as_slice() {
            [ConditionExpr::ToolNameMatchesAny(PatternSource::Inline(patterns))] => {
                assert_eq!(patterns, &vec!["^system\\.".to_string()]);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
        assert!(cond.all.is_empty());
    }

    #[test]
    fn condition_expr_matcher_reference() {
        let yaml = "all:\n  - args_contain_any_keys: \"$matchers.sensitive_keys\"";
        let cond: RuleCondition = serde_yaml::from_str(yaml).unwrap();
        match cond.all.as_slice() {
            [ConditionExpr::ArgsContainAnyKeys(PatternSource::Single(s))] => {
                assert_eq!(s, "$matchers.sensitive_keys");
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn rule_with_when_clause_parses() {
        let yaml = r#"
id: forced-system-write
tier: T2
when:
  any:
    - tool_name_matches_any: ["^system\\."]
  all:
    - args_contain_any_keys: ["force"]
require: [explicit_consent]
on_fail:
  decision: ask_user
  message: "Confirm forced system writes."
"#;
        let rule: PolicyRule = serde_yaml::from_str(yaml).unwrap();
        let when = rule.when.expect("when clause");
        assert_eq!(when.any.len(), 1);
        assert_eq!(when.all.len(), 1);
        assert_eq!(rule.require, vec![RequirementKey::ExplicitConsent]);
    }

    #[test]
    fn condition_serializes_as_single_key_maps() {
        let cond = RuleCondition {
            any: vec![ConditionExpr::ToolNameMatchesAny(PatternSource::Single(
                "$matchers.high_risk_tools".to_string(),
            ))],
            all: vec![],
        };
        let yaml = serde_yaml::to_string(&cond).unwrap();
        assert!(yaml.contains("tool_name_matches_any:"));
        assert!(!yaml.contains("!tool_name_matches_any"));

        let back: RuleCondition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.any.len(), 1);
    }

    #[test]
    fn rule_defaults_when_and_require() {
        let yaml = r#"
id: always-on
tier: T1
on_fail:
  decision: deny
  message: "blocked"
"#;
        let rule: PolicyRule = serde_yaml::from_str(yaml).unwrap();
        assert!(rule.when.is_none());
        assert!(rule.require.is_empty());
        assert_eq!(rule.on_fail.decision, Decision::Deny);
    }

    #[test]
    fn evaluation_input_defaults() {
        let input: EvaluationInput = serde_json::from_str(r#"{"tool":"fs.read"}"#).unwrap();
        assert_eq!(input.tool, "fs.read");
        assert!(input.args.is_null());
        assert!(input.reason.is_none());
        assert!(!input.explicit_consent);
        assert!(input.rollback_plan.is_empty());
    }
}
