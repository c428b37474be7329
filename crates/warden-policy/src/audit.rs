//! Audit pipeline for access decisions.
//!
//! Every `check_policy` call emits exactly one [`EvaluationRecord`] to the
//! configured sink, granted or denied. The engine never persists records;
//! the sink's destination and format belong to the host.

use crate::errors::RoleFailure;
use crate::policy::{EvaluationLogic, Policy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Granted/denied outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Access was granted
    Granted,
    /// Access was denied
    Denied,
}

/// One role as it was applied: kind plus the scopes chosen at instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRole {
    /// Kind discriminant
    pub kind: String,
    /// Scopes applied at instantiation, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<BTreeSet<String>>,
}

/// Audit line describing one access decision.
///
/// `reasons_denied` is populated only on denial; a granted `any` decision
/// discards the failures of its non-passing roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Correlation id from the request context
    pub trace_id: String,
    /// Coordinate of the protected field or type
    pub schema_coordinate: String,
    /// Roles in declaration order
    pub roles: Vec<AppliedRole>,
    /// Combination logic of the evaluated policy
    pub logic: EvaluationLogic,
    /// Outcome
    pub decision: Decision,
    /// `(role kind, reason)` pairs in declaration order, denial only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons_denied: Option<Vec<RoleFailure>>,
}

impl EvaluationRecord {
    /// Project the applied-role descriptors out of a policy, preserving
    /// declaration order.
    pub(crate) fn applied_roles(policy: &Policy) -> Vec<AppliedRole> {
        policy
            .roles()
            .iter()
            .map(|role| AppliedRole {
                kind: role.kind().to_string(),
                scopes: role.applied_scopes().cloned(),
            })
            .collect()
    }
}

/// Host-injected destination for evaluation records.
pub trait AuditSink: Send + Sync {
    /// Accept one record. Must not block the evaluation path.
    fn record(&self, record: &EvaluationRecord);
}

/// Default sink writing records through `tracing` under the
/// `warden::audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &EvaluationRecord) {
        match record.decision {
            Decision::Granted => tracing::info!(
                target: "warden::audit",
                trace_id = %record.trace_id,
                coordinate = %record.schema_coordinate,
                logic = %record.logic,
                roles = ?record.roles,
                "access granted"
            ),
            Decision::Denied => tracing::warn!(
                target: "warden::audit",
                trace_id = %record.trace_id,
                coordinate = %record.schema_coordinate,
                logic = %record.logic,
                roles = ?record.roles,
                reasons = ?record.reasons_denied,
                "access denied"
            ),
        }
    }
}

/// Capturing sink for tests and hosts that forward records elsewhere.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<EvaluationRecord>>,
}

impl MemoryAuditSink {
    /// Empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured records, in emission order.
    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &EvaluationRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(decision: Decision) -> EvaluationRecord {
        EvaluationRecord {
            trace_id: "aaa".to_string(),
            schema_coordinate: "User.password".to_string(),
            roles: vec![AppliedRole {
                kind: "OwnerMatch".to_string(),
                scopes: None,
            }],
            logic: EvaluationLogic::All,
            decision,
            reasons_denied: None,
        }
    }

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemoryAuditSink::new();
        sink.record(&sample_record(Decision::Granted));
        sink.record(&sample_record(Decision::Denied));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].decision, Decision::Granted);
        assert_eq!(records[1].decision, Decision::Denied);
    }

    #[test]
    fn test_record_serialization_omits_empty_reasons() {
        let json = serde_json::to_value(sample_record(Decision::Granted)).unwrap();
        assert_eq!(json["decision"], "granted");
        assert_eq!(json["logic"], "all");
        assert!(json.get("reasons_denied").is_none());
        assert!(json["roles"][0].get("scopes").is_none());
    }
}
