// audit.rs — Audit subcommands: verify, tail.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use toolgate_audit::{AuditError, AuditLog};

const DEFAULT_AUDIT_LOG: &str = ".toolgate/audit.jsonl";

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Verify the audit log hash chain integrity.
    Verify,
    /// Show recent audit records.
    Tail {
        /// Number of records to show.
        #[arg(short, default_value = "10")]
        n: usize,
    },
}

pub fn execute(cmd: &AuditCommands, audit_log: Option<&Path>) -> anyhow::Result<i32> {
    let path = audit_log
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG));

    if !path.exists() {
        println!("No audit log found at {}", path.display());
        return Ok(0);
    }

    match cmd {
        AuditCommands::Verify => match AuditLog::verify_chain(&path) {
            Ok(()) => {
                let records = AuditLog::read_all(&path)?;
                println!(
                    "Audit log verified: {} record(s), hash chain intact.",
                    records.len()
                );
                Ok(0)
            }
            Err(AuditError::IntegrityViolation {
                line,
                expected,
                actual,
            }) => {
                println!("INTEGRITY VIOLATION at line {}:", line);
                println!("  Expected previous_hash: {}", expected);
                println!("  Actual previous_hash:   {}", actual);
                println!();
                println!("The audit log may have been tampered with.");
                Ok(1)
            }
            Err(e) => Err(e.into()),
        },

        AuditCommands::Tail { n } => {
            let records = AuditLog::read_all(&path)?;
            let start = records.len().saturating_sub(*n);
            let recent = &records[start..];

            if recent.is_empty() {
                println!("No audit records.");
                return Ok(0);
            }

            println!("{:<26} {:<20} {:<12} MESSAGE", "TIMESTAMP", "TOOL", "DECISION");
            println!("{}", "-".repeat(90));
            for record in recent {
                println!(
                    "{:<26} {:<20} {:<12} {}",
                    record.ts.format("%Y-%m-%d %H:%M:%S"),
                    record.tool,
                    record.decision,
                    record.message,
                );
            }
            Ok(0)
        }
    }
}
