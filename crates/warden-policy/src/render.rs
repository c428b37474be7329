//! Serialization hooks for attached policies.
//!
//! The engine guarantees a stable, order-preserving textual form of
//! `(kind, applied scopes, input argument)` per role; how the host renders
//! that into schema directives or documentation is its own concern.

use crate::policy::{EvaluationLogic, Policy};
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Stable textual form of one role, e.g.
/// `{name: CategoryScoped, scopes: ["BARKS_AT_MAILMAN"], inputArg: "input.category"}`.
///
/// Scopes appear in sorted order; absent scopes and input argument are
/// omitted.
pub fn render_role(role: &Role) -> String {
    let mut rendered = format!("name: {}", role.kind());

    if let Some(scopes) = role.applied_scopes() {
        let quoted: Vec<String> = scopes.iter().map(|scope| format!("{scope:?}")).collect();
        rendered.push_str(&format!(", scopes: [{}]", quoted.join(", ")));
    }

    if let Some(path) = role.input_arg() {
        rendered.push_str(&format!(", inputArg: {path:?}"));
    }

    format!("{{{rendered}}}")
}

/// Human-readable description of an attached policy, suitable for appending
/// to a field or type description.
pub fn policy_description(policy: &Policy) -> String {
    let rendered: Vec<String> = policy.roles().iter().map(render_role).collect();
    let joined = rendered.join(", ");

    let policy_string = if policy.roles().len() == 1 {
        format!("role: {joined}")
    } else if policy.logic() == EvaluationLogic::Any {
        format!("match_any: [{joined}]")
    } else {
        format!("match_all: [{joined}]")
    };

    format!(
        "access policy applied to {}:\n\n@accessPolicy({policy_string})",
        policy.applied_to()
    )
}

/// Machine-readable form of one role inside policy metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMetadata {
    /// Kind discriminant
    pub name: String,
    /// Applied scopes in sorted order, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Input-argument path, if configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_arg: Option<String>,
}

/// Machine-readable form of an attached policy, keyed by its role form the
/// way the original declaration was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMetadata {
    /// Single-role policy
    Role(RoleMetadata),
    /// All listed roles must pass
    MatchAll(Vec<RoleMetadata>),
    /// At least one listed role must pass
    MatchAny(Vec<RoleMetadata>),
}

/// Project a policy into its machine-readable metadata form.
pub fn policy_metadata(policy: &Policy) -> PolicyMetadata {
    let mut roles: Vec<RoleMetadata> = policy
        .roles()
        .iter()
        .map(|role| RoleMetadata {
            name: role.kind().to_string(),
            scopes: role
                .applied_scopes()
                .map(|scopes| scopes.iter().cloned().collect()),
            input_arg: role.input_arg().map(str::to_string),
        })
        .collect();

    // A one-role policy was declared with `role:`, not a list.
    if roles.len() == 1 {
        return PolicyMetadata::Role(roles.remove(0));
    }

    match policy.logic() {
        EvaluationLogic::All => PolicyMetadata::MatchAll(roles),
        EvaluationLogic::Any => PolicyMetadata::MatchAny(roles),
    }
}
