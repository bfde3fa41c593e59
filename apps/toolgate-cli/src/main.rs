//! # toolgate-cli
//!
//! Command-line interface for policy-gated tool invocation:
//! - `toolgate check` — evaluate a proposed invocation against a policy
//!   document and print the verdict
//! - `toolgate run` — evaluate, and forward to the downstream gateway
//!   when the verdict is `allow`
//! - `toolgate audit verify/tail` — inspect the tamper-evident audit trail
//!
//! Exit status: 0 for `allow`, 2 for any other verdict, 1 for operational
//! errors (unreadable policy, gateway unreachable).

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Policy-gated tool invocation.
#[derive(Parser)]
#[command(name = "toolgate", version, about)]
struct Cli {
    /// Path to the policy document.
    #[arg(long, default_value = "policy/toolgate-policy.yaml", global = true)]
    policy: PathBuf,

    /// Append verdicts to this audit log (skipped when unset).
    #[arg(long, global = true)]
    audit_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a proposed invocation and print the verdict.
    Check {
        #[command(flatten)]
        input: commands::gate::InputArgs,
        /// Print the full verdict as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Evaluate, then forward to the gateway if allowed.
    Run {
        #[command(flatten)]
        input: commands::gate::InputArgs,
        /// Base URL of the downstream tool gateway.
        #[arg(long, default_value = "http://127.0.0.1:18789")]
        gateway_url: String,
    },
    /// Inspect the audit trail.
    Audit {
        #[command(subcommand)]
        command: commands::audit::AuditCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Check { input, json } => {
            commands::gate::check(&cli.policy, input, cli.audit_log.as_deref(), *json)?
        }
        Commands::Run { input, gateway_url } => {
            commands::gate::run(&cli.policy, input, cli.audit_log.as_deref(), gateway_url).await?
        }
        Commands::Audit { command } => {
            commands::audit::execute(command, cli.audit_log.as_deref())?
        }
    };

    std::process::exit(exit_code);
}
