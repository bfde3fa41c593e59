//! # toolgate-policy
//!
//! Declarative policy engine for gated tool invocation.
//!
//! A [`PolicyDocument`] is an ordered list of rules, each with an optional
//! condition (`when`) and a list of requirements (`require`). The
//! [`PolicyEngine`] walks the rules top-to-bottom: the first rule whose
//! condition matches but whose requirements fail decides the verdict; if
//! every applicable rule passes, the document's default decision applies.
//!
//! Requirements are either direct metadata checks (stated reason, explicit
//! consent, rollback plan, change ticket, override flag) or heuristic
//! semantic checks: pure pattern-detectors for secret leakage,
//! exfiltration indicators, reverse-shell targets, prompt injection,
//! unlabeled assumptions, and reason/action alignment.
//!
//! ## Key invariants
//!
//! - **First failure wins**: rules after the terminal failure are never
//!   evaluated.
//! - **Never raises on malformed policy content**: unresolvable matcher
//!   references match nothing, invalid regex patterns never match, unknown
//!   requirement keys are satisfied.
//! - **Pure evaluation**: no I/O, no shared mutable state; one engine can
//!   serve concurrent evaluations.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use toolgate_policy::{load_policy, EvaluationInput, PolicyEngine};
//!
//! let policy = load_policy("policy/toolgate-policy.yaml").unwrap();
//! let engine = PolicyEngine::new(policy);
//! let input = EvaluationInput::new("system.run", serde_json::json!({"cmd": "ls"}))
//!     .with_reason("list scratch files");
//! let verdict = engine.evaluate(&input);
//! println!("[{}] {}", verdict.decision, verdict.message);
//! ```

pub mod condition;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod requirement;
pub mod text;

pub use engine::PolicyEngine;
pub use error::PolicyError;
pub use heuristics::{HeuristicCatalog, HeuristicResult};
pub use loader::{load_policy, parse_policy};
pub use model::{
    ConditionExpr, Decision, EvaluationInput, EvaluationResult, PatternSource, PolicyDocument,
    PolicyRule, RequirementKey, RuleCondition, RuleVerdict, Tier, TierConfig,
};
pub use text::MAX_SCAN_LENGTH;
