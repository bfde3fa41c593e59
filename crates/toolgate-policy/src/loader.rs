// loader.rs — YAML policy document loading.

use std::fs;
use std::path::Path;

use crate::error::PolicyError;
use crate::model::PolicyDocument;

/// Load a policy document from a YAML file.
pub fn load_policy(path: impl AsRef<Path>) -> Result<PolicyDocument, PolicyError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_policy(&raw)
}

/// Parse a policy document from a YAML string.
pub fn parse_policy(raw: &str) -> Result<PolicyDocument, PolicyError> {
    let policy: PolicyDocument = serde_yaml::from_str(raw)?;
    tracing::debug!(
        name = %policy.name,
        version = %policy.version,
        rules = policy.rules.len(),
        "loaded policy document"
    );
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decision, RequirementKey, Tier};

    const SAMPLE: &str = r#"
version: "1"
name: "test policy"
default_decision: allow
tiers:
  T0: { friction: "none" }
  T2: { friction: "explicit consent" }
matchers:
  high_risk_tools:
    - "^system\\."
    - "^deploy\\."
rules:
  - id: high-risk-consent
    tier: T2
    when:
      any:
        - tool_name_matches_any: "$matchers.high_risk_tools"
    require: [reason_present, explicit_consent]
    on_fail:
      decision: ask_user
      message: "High-risk tools need a reason and explicit consent."
"#;

    #[test]
    fn parses_a_complete_document() {
        let policy = parse_policy(SAMPLE).unwrap();
        assert_eq!(policy.name, "test policy");
        assert_eq!(policy.default_decision, Decision::Allow);
        assert_eq!(policy.tiers.len(), 2);
        assert_eq!(policy.tiers[&Tier::T2].friction, "explicit consent");
        assert_eq!(policy.matchers["high_risk_tools"].len(), 2);
        assert_eq!(policy.rules.len(), 1);
        assert_eq!(
            policy.rules[0].require,
            vec![
                RequirementKey::ReasonPresent,
                RequirementKey::ExplicitConsent
            ]
        );
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            parse_policy("rules: [unclosed"),
            Err(PolicyError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_policy("/nonexistent/policy.yaml"),
            Err(PolicyError::Io { .. })
        ));
    }

    #[test]
    fn unknown_requirement_keys_still_parse() {
        let yaml = r#"
version: "1"
name: "forward compat"
default_decision: deny
rules:
  - id: future
    tier: T0
    require: [quantum_safe_check]
    on_fail: { decision: deny, message: "no" }
"#;
        let policy = parse_policy(yaml).unwrap();
        assert_eq!(
            policy.rules[0].require,
            vec![RequirementKey::Unknown("quantum_safe_check".to_string())]
        );
    }
}
