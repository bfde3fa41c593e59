// record.rs — Audit record data model.
//
// One record per policy evaluation: what was asked, what was decided, and
// which rules matched on the way. Records chain to their predecessor via
// `previous_hash` so tampering is detectable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single audit record — one line in the JSONL audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,

    /// When the evaluation happened (UTC).
    pub ts: DateTime<Utc>,

    /// The tool the caller asked to invoke.
    pub tool: String,

    /// The decision, in its snake_case wire form (e.g., "ask_user").
    pub decision: String,

    /// The human-readable verdict message.
    pub message: String,

    /// Ordered ids of the rules that matched during the walk.
    pub matched_rules: Vec<String>,

    /// Hash of the previous record's JSON line. None for the first record.
    pub previous_hash: Option<String>,
}

impl AuditRecord {
    /// Build a record for one verdict with the current timestamp.
    /// `previous_hash` is filled in by the log on append.
    pub fn new(
        tool: impl Into<String>,
        decision: impl Into<String>,
        message: impl Into<String>,
        matched_rules: Vec<String>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            ts: Utc::now(),
            tool: tool.into(),
            decision: decision.into(),
            message: message.into(),
            matched_rules,
            previous_hash: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization_round_trip() {
        let record = AuditRecord::new(
            "system.run",
            "deny",
            "High-risk tools require a stated reason.",
            vec!["system-needs-reason".to_string()],
        );

        let json = serde_json::to_string(&record).expect("serialize");
        let restored: AuditRecord = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(record.record_id, restored.record_id);
        assert_eq!(record.tool, restored.tool);
        assert_eq!(record.decision, restored.decision);
        assert_eq!(record.matched_rules, restored.matched_rules);
        assert!(restored.previous_hash.is_none());
    }

    #[test]
    fn record_ids_are_unique() {
        let a = AuditRecord::new("t", "allow", "ok", vec![]);
        let b = AuditRecord::new("t", "allow", "ok", vec![]);
        assert_ne!(a.record_id, b.record_id);
    }
}
