//! Policy construction.
//!
//! A policy is an ordered, immutable list of instantiated roles plus the
//! logic combining them. Declaration order is preserved through evaluation
//! and into audit records.

use crate::errors::ConstructionError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a policy combines its roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationLogic {
    /// Every role must pass
    All,
    /// At least one role must pass
    Any,
}

/// Whether a policy protects a single field or a whole type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedTo {
    /// Policy attached to one field
    Field,
    /// Policy attached to every field of a type
    Type,
}

impl fmt::Display for EvaluationLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for AppliedTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// The exactly-one role form a policy is built from.
///
/// Encoding the three forms as an enum makes "zero or several forms"
/// unrepresentable; the remaining runtime misuse is an empty list.
#[derive(Debug)]
pub enum PolicyRoles {
    /// One role; implies [`EvaluationLogic::All`] over a one-element list
    Single(Role),
    /// Every listed role must pass
    MatchAll(Vec<Role>),
    /// At least one listed role must pass
    MatchAny(Vec<Role>),
}

/// An immutable access policy attached to one protected field or type.
///
/// Built once at schema wiring time and shared read-only across requests;
/// cloning is cheap since roles hold their checks behind `Arc`.
#[derive(Debug, Clone)]
pub struct Policy {
    roles: Vec<Role>,
    logic: EvaluationLogic,
    applied_to: AppliedTo,
}

/// Build a policy from exactly one role form.
///
/// Fails on an empty `MatchAll`/`MatchAny` list; role-level invariants were
/// already enforced when each [`Role`] was built.
pub fn build_policy(applied_to: AppliedTo, roles: PolicyRoles) -> Result<Policy, ConstructionError> {
    let (roles, logic) = match roles {
        PolicyRoles::Single(role) => (vec![role], EvaluationLogic::All),
        PolicyRoles::MatchAll(roles) => (roles, EvaluationLogic::All),
        PolicyRoles::MatchAny(roles) => (roles, EvaluationLogic::Any),
    };

    if roles.is_empty() {
        return Err(ConstructionError::EmptyRoleList);
    }

    Ok(Policy {
        roles,
        logic,
        applied_to,
    })
}

impl Policy {
    /// Roles in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Combination logic.
    pub fn logic(&self) -> EvaluationLogic {
        self.logic
    }

    /// Whether this policy protects a field or a type.
    pub fn applied_to(&self) -> AppliedTo {
        self.applied_to
    }

    /// Comparison keys the host's source value must expose for this policy.
    ///
    /// Covers roles that read the source attribute (no input argument
    /// configured); hosts can assert these attributes exist when wiring the
    /// policy onto a type.
    pub fn required_source_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for role in &self.roles {
            if role.input_arg().is_some() {
                continue;
            }
            if let Some(key) = role.comparison_key() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{CategoryScoped, OwnerMatch};

    fn owner_role() -> Role {
        Role::new(OwnerMatch::new()).unwrap()
    }

    fn scoped_role() -> Role {
        Role::builder(CategoryScoped::new("dog", ["IS_A_GOOD_BOY"]))
            .scopes(["IS_A_GOOD_BOY"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_role_implies_all_logic() {
        let policy = build_policy(AppliedTo::Field, PolicyRoles::Single(owner_role())).unwrap();
        assert_eq!(policy.logic(), EvaluationLogic::All);
        assert_eq!(policy.roles().len(), 1);
    }

    #[test]
    fn test_match_all_and_match_any_logic() {
        let all = build_policy(
            AppliedTo::Field,
            PolicyRoles::MatchAll(vec![owner_role(), scoped_role()]),
        )
        .unwrap();
        assert_eq!(all.logic(), EvaluationLogic::All);

        let any = build_policy(
            AppliedTo::Type,
            PolicyRoles::MatchAny(vec![owner_role(), scoped_role()]),
        )
        .unwrap();
        assert_eq!(any.logic(), EvaluationLogic::Any);
        assert_eq!(any.applied_to(), AppliedTo::Type);
    }

    #[test]
    fn test_empty_role_list_rejected() {
        let err = build_policy(AppliedTo::Field, PolicyRoles::MatchAll(vec![]));
        assert_eq!(err.unwrap_err(), ConstructionError::EmptyRoleList);

        let err = build_policy(AppliedTo::Field, PolicyRoles::MatchAny(vec![]));
        assert_eq!(err.unwrap_err(), ConstructionError::EmptyRoleList);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let policy = build_policy(
            AppliedTo::Field,
            PolicyRoles::MatchAll(vec![scoped_role(), owner_role()]),
        )
        .unwrap();
        let kinds: Vec<&str> = policy.roles().iter().map(Role::kind).collect();
        assert_eq!(kinds, vec!["CategoryScoped", "OwnerMatch"]);
    }

    #[test]
    fn test_required_source_keys() {
        let policy = build_policy(
            AppliedTo::Field,
            PolicyRoles::MatchAll(vec![owner_role(), scoped_role()]),
        )
        .unwrap();
        assert_eq!(policy.required_source_keys(), vec!["owner_id", "category"]);

        // A role reading an input argument needs nothing from the source.
        let dynamic = Role::builder(OwnerMatch::new())
            .input_arg("user_id")
            .build()
            .unwrap();
        let policy = build_policy(AppliedTo::Field, PolicyRoles::Single(dynamic)).unwrap();
        assert!(policy.required_source_keys().is_empty());
    }
}
