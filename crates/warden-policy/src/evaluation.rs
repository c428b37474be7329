//! Policy evaluation.
//!
//! The evaluator is a synchronous gate: pure computation over
//! already-resolved inputs, no blocking I/O, no partial state. Roles run
//! sequentially in declaration order and every role runs to completion even
//! after the outcome is determined, so audit records always carry the
//! complete failure set.

use crate::audit::{AuditSink, Decision, EvaluationRecord, TracingAuditSink};
use crate::errors::{AccessDeniedError, RoleError, RoleFailure};
use crate::input::resolve_input_arg;
use crate::policy::{EvaluationLogic, Policy};
use crate::role::Role;
use serde_json::{Map, Value};
use std::sync::Arc;
use warden_core::{RequestContext, SchemaCoordinate};

/// Evaluates policies against per-request state and emits audit records.
///
/// One evaluator is typically constructed at host startup and shared across
/// requests; it holds only the audit sink.
#[derive(Clone)]
pub struct PolicyEvaluator {
    sink: Arc<dyn AuditSink>,
}

impl PolicyEvaluator {
    /// Evaluator writing audit records through the default tracing sink.
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingAuditSink),
        }
    }

    /// Evaluator writing audit records to a host-supplied sink.
    pub fn with_sink(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Evaluate one policy for one protected field or type.
    ///
    /// Runs every role in declaration order, aggregates per the policy's
    /// logic, emits one audit record, and returns the aggregated denial if
    /// the policy did not pass. The host must call this before producing the
    /// protected value and must scope a denial to the field's location
    /// rather than failing the whole request.
    pub fn check_policy(
        &self,
        policy: &Policy,
        coordinate: &SchemaCoordinate,
        source: &Value,
        context: &RequestContext,
        raw_inputs: &Map<String, Value>,
    ) -> Result<(), AccessDeniedError> {
        let failures = evaluate_roles(policy, source, context, raw_inputs);

        let passed = match policy.logic() {
            EvaluationLogic::All => failures.is_empty(),
            EvaluationLogic::Any => policy.roles().len() > failures.len(),
        };

        let record = EvaluationRecord {
            trace_id: context.trace_id().to_string(),
            schema_coordinate: coordinate.to_string(),
            roles: EvaluationRecord::applied_roles(policy),
            logic: policy.logic(),
            decision: if passed {
                Decision::Granted
            } else {
                Decision::Denied
            },
            // On a granted `any` decision some roles may have failed
            // internally; those do not count as denial reasons.
            reasons_denied: if passed { None } else { Some(failures.clone()) },
        };
        self.sink.record(&record);

        if passed {
            Ok(())
        } else {
            Err(AccessDeniedError::new(failures))
        }
    }
}

impl Default for PolicyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PolicyEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEvaluator").finish_non_exhaustive()
    }
}

/// Run every role, collecting `(kind, reason)` diagnostics. No
/// short-circuiting: the complete failure set is part of the contract.
fn evaluate_roles(
    policy: &Policy,
    source: &Value,
    context: &RequestContext,
    raw_inputs: &Map<String, Value>,
) -> Vec<RoleFailure> {
    let mut failures = Vec::new();

    for role in policy.roles() {
        if let Err(reason) = evaluate_role(role, source, context, raw_inputs) {
            tracing::debug!(
                target: "warden::policy",
                role = role.kind(),
                %reason,
                "role check failed"
            );
            failures.push(RoleFailure {
                role_kind: role.kind().to_string(),
                reason: reason.to_string(),
            });
        }
    }

    failures
}

/// Evaluate one role: resolve its input argument when configured, then run
/// the check. Resolution failures fold into the role's own diagnostic.
fn evaluate_role(
    role: &Role,
    source: &Value,
    context: &RequestContext,
    raw_inputs: &Map<String, Value>,
) -> Result<(), RoleError> {
    let input_value = match role.input_arg() {
        Some(path) => Some(resolve_input_arg(path, raw_inputs)?),
        None => None,
    };

    role.validate(source, context, input_value.as_ref())
}
