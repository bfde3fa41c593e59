// gate.rs — The check and run subcommands.
//
// `check` evaluates and reports; `run` additionally forwards allowed
// invocations to the downstream gateway. Both append to the audit log
// when one is configured — audit failures are logged and swallowed, never
// turned into evaluation failures.

use std::path::Path;

use clap::Args;
use toolgate_audit::{AuditLog, AuditRecord};
use toolgate_invoke::{InvokeClient, InvokeOutcome};
use toolgate_policy::{load_policy, Decision, EvaluationInput, EvaluationResult, PolicyEngine};

/// Exit code for a verdict other than `allow`.
const EXIT_GATED: i32 = 2;

/// The proposed invocation, as CLI flags.
#[derive(Args)]
pub struct InputArgs {
    /// The real tool name to invoke (e.g., "system.run").
    #[arg(long)]
    pub tool: String,

    /// Arguments for the tool, as a JSON value.
    #[arg(long, default_value = "{}")]
    pub args: String,

    /// Short goal for the action.
    #[arg(long)]
    pub reason: Option<String>,

    /// The operator explicitly approved this action.
    #[arg(long)]
    pub explicit_consent: bool,

    /// Rollback plan for high-impact actions.
    #[arg(long, default_value = "")]
    pub rollback_plan: String,

    /// Change-management ticket reference.
    #[arg(long, default_value = "")]
    pub change_ticket: String,

    /// The operator explicitly overrode a softer verdict.
    #[arg(long)]
    pub explicit_override: bool,
}

impl InputArgs {
    fn to_input(&self) -> anyhow::Result<EvaluationInput> {
        let args: serde_json::Value = serde_json::from_str(&self.args)
            .map_err(|e| anyhow::anyhow!("--args is not valid JSON: {}", e))?;
        Ok(EvaluationInput {
            tool: self.tool.clone(),
            args,
            reason: self.reason.clone(),
            explicit_consent: self.explicit_consent,
            rollback_plan: self.rollback_plan.clone(),
            change_ticket: self.change_ticket.clone(),
            explicit_override: self.explicit_override,
        })
    }
}

pub fn check(
    policy_path: &Path,
    input_args: &InputArgs,
    audit_log: Option<&Path>,
    json: bool,
) -> anyhow::Result<i32> {
    let input = input_args.to_input()?;
    let verdict = evaluate(policy_path, &input)?;
    write_audit(audit_log, &input, &verdict);

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_verdict(&verdict);
    }

    Ok(exit_code_for(&verdict))
}

pub async fn run(
    policy_path: &Path,
    input_args: &InputArgs,
    audit_log: Option<&Path>,
    gateway_url: &str,
) -> anyhow::Result<i32> {
    let input = input_args.to_input()?;
    let verdict = evaluate(policy_path, &input)?;
    write_audit(audit_log, &input, &verdict);

    if verdict.decision != Decision::Allow {
        print_verdict(&verdict);
        return Ok(EXIT_GATED);
    }

    let client = InvokeClient::new(gateway_url);
    match client.invoke(&input.tool, &input.args).await? {
        InvokeOutcome::Success(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(0)
        }
        InvokeOutcome::Failure { status, detail } => {
            println!("Tool invoke failed ({}): {}", status, detail);
            Ok(1)
        }
    }
}

fn evaluate(policy_path: &Path, input: &EvaluationInput) -> anyhow::Result<EvaluationResult> {
    let policy = load_policy(policy_path)?;
    let engine = PolicyEngine::new(policy);
    Ok(engine.evaluate(input))
}

fn print_verdict(verdict: &EvaluationResult) {
    println!("[{}] {}", verdict.decision, verdict.message);
    if !verdict.matched_rules.is_empty() {
        println!("matched rules: {}", verdict.matched_rules.join(", "));
    }
}

fn exit_code_for(verdict: &EvaluationResult) -> i32 {
    if verdict.decision == Decision::Allow {
        0
    } else {
        EXIT_GATED
    }
}

/// Append the verdict to the audit log. A missing sink skips silently; a
/// write failure warns and continues — auditing never blocks the gate.
fn write_audit(path: Option<&Path>, input: &EvaluationInput, verdict: &EvaluationResult) {
    let path = match path {
        Some(p) => p,
        None => return,
    };

    let mut record = AuditRecord::new(
        input.tool.clone(),
        verdict.decision.to_string(),
        verdict.message.clone(),
        verdict.matched_rules.clone(),
    );
    let result = AuditLog::open(path).and_then(|mut log| log.append(&mut record));
    if let Err(err) = result {
        tracing::warn!(path = %path.display(), %err, "audit write failed; continuing");
    }
}
