//! # toolgate-audit
//!
//! Append-only audit trail for policy verdicts.
//!
//! Every evaluation is recorded as one [`AuditRecord`] per line in a JSONL
//! file. Records are hash-chained: each one carries the SHA-256 of the
//! previous line, so any insertion, deletion, or edit is detectable with
//! [`AuditLog::verify_chain`].
//!
//! The trail is advisory by contract: callers log and swallow
//! [`AuditError`]s around evaluation — a broken audit sink must never
//! block a policy verdict.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use toolgate_audit::{AuditLog, AuditRecord};
//!
//! let mut log = AuditLog::open(".toolgate/audit.jsonl").unwrap();
//! let mut record = AuditRecord::new(
//!     "system.run",
//!     "deny",
//!     "High-risk tools require a stated reason.",
//!     vec!["system-needs-reason".to_string()],
//! );
//! log.append(&mut record).unwrap();
//! ```

pub mod error;
pub mod log;
pub mod record;

pub use error::AuditError;
pub use log::AuditLog;
pub use record::AuditRecord;
