//! Error taxonomy for policy construction and evaluation.
//!
//! Three layers with distinct propagation rules:
//! - [`ConstructionError`] is fatal at schema build time and never reaches
//!   request time.
//! - [`RoleError`] and [`InputResolutionError`] are always caught inside the
//!   evaluator and folded into per-role diagnostics.
//! - [`AccessDeniedError`] is the only error surfaced to the host per
//!   protected field, aggregating every collected diagnostic.

use serde::{Deserialize, Serialize};
use warden_core::WardenError;

/// Malformed policy or role composition. Fatal at build time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// A `match_all`/`match_any` list was empty
    #[error("a policy requires at least one role")]
    EmptyRoleList,

    /// Scopes were supplied to a role that declares no scope universe
    #[error("{kind} does not accept scopes")]
    ScopesNotAccepted {
        /// Role kind the scopes were supplied to
        kind: String,
    },

    /// A supplied scope is not in the role's declared universe
    #[error("{scope} is not a valid scope allowed for {kind}")]
    UnknownScope {
        /// Role kind the scope was supplied to
        kind: String,
        /// The offending scope
        scope: String,
    },

    /// An explicit scope selection was empty
    #[error("{kind} was given an empty scope selection")]
    EmptyScopeSelection {
        /// Role kind the selection was supplied to
        kind: String,
    },

    /// A role variant declared no maintaining team
    #[error("{kind} must declare a non-empty owner")]
    MissingOwner {
        /// Role kind missing an owner
        kind: String,
    },

    /// A role variant declared an empty kind discriminant
    #[error("role kind must be non-empty")]
    MissingKind,
}

/// A declared input-argument path could not be resolved against the raw
/// arguments. Treated as a role-level failure, never an evaluation abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputResolutionError {
    /// Top-level argument (or the `input` container itself) was absent
    #[error(
        "could not find \"{name}\" as a resolver argument \
         (ensure the path names a resolver argument in its host-side spelling, \
         and prefix it with \"input.\" only when the arguments carry a nested input container)"
    )]
    MissingArgument {
        /// The missing argument name
        name: String,
    },

    /// A segment inside the nested input container was absent
    #[error(
        "could not find \"{segment}\" inside the \"input\" container \
         (ensure the segment names a field of the input object in its host-side spelling)"
    )]
    MissingNestedKey {
        /// The first missing path segment
        segment: String,
    },

    /// A dotted path was used without the `input.` prefix
    #[error(
        "\"{path}\" is not a valid argument path \
         (nested paths are only valid with the \"input.\" prefix; use a plain key otherwise)"
    )]
    NestedPathWithoutContainer {
        /// The malformed path
        path: String,
    },

    /// The path resolved to an explicit null
    #[error("\"{name}\" resolved to null; authorization requires a concrete argument value")]
    NullArgument {
        /// The argument path that resolved to null
        name: String,
    },
}

/// A single role's semantic failure. Always caught by the evaluator.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    /// The caller is not authenticated
    #[error("caller is not authenticated")]
    NotAuthenticated,

    /// The comparison attribute is absent from the source value
    #[error("attribute \"{key}\" was not found on the source value")]
    AttributeNotFound {
        /// The missing comparison key
        key: String,
    },

    /// The comparison attribute exists but has an unusable shape
    #[error("attribute \"{key}\" is unusable: {reason}")]
    InvalidAttribute {
        /// The comparison key that was read
        key: String,
        /// Why the value could not be used
        reason: String,
    },

    /// The subject id does not match the authenticated principal
    #[error("authenticated principal does not match the subject")]
    PrincipalMismatch,

    /// The subject belongs to a different category than the role expects
    #[error("subject category is \"{actual}\", expected \"{expected}\"")]
    CategoryMismatch {
        /// Category the role was configured for
        expected: String,
        /// Category read from the subject
        actual: String,
    },

    /// The context carries no claim set for the role's category
    #[error("context carries no claim set for category \"{category}\"")]
    ClaimsUnavailable {
        /// The category whose claims were required
        category: String,
    },

    /// None of the applied scopes appear in the caller's claim set
    #[error("no matching scope")]
    NoMatchingScope,

    /// The role was instantiated without the scopes it requires
    #[error("{kind} requires at least one scope to be defined")]
    ScopesRequired {
        /// Role kind missing its scopes
        kind: String,
    },

    /// The role's declared input argument could not be resolved
    #[error(transparent)]
    Input(#[from] InputResolutionError),
}

/// One `(role kind, reason)` diagnostic pair, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFailure {
    /// Kind discriminant of the failing role
    pub role_kind: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Denial of access to one protected field or type.
///
/// Carries every collected per-role diagnostic; the host must null out the
/// protected value and attach this as a field-scoped failure without
/// aborting sibling fields.
#[derive(Debug, Clone, thiserror::Error)]
#[error("access denied to protected field")]
pub struct AccessDeniedError {
    failures: Vec<RoleFailure>,
}

impl AccessDeniedError {
    /// Build a denial from the evaluator's collected diagnostics.
    pub fn new(failures: Vec<RoleFailure>) -> Self {
        Self { failures }
    }

    /// Collected `(role kind, reason)` pairs, in declaration order.
    pub fn failures(&self) -> &[RoleFailure] {
        &self.failures
    }
}

impl From<ConstructionError> for WardenError {
    fn from(err: ConstructionError) -> Self {
        WardenError::invalid(err.to_string())
    }
}

impl From<AccessDeniedError> for WardenError {
    fn from(err: AccessDeniedError) -> Self {
        let reasons: Vec<String> = err
            .failures()
            .iter()
            .map(|f| format!("{}: {}", f.role_kind, f.reason))
            .collect();
        WardenError::permission_denied(format!("{err} [{}]", reasons.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_display() {
        let err = ConstructionError::UnknownScope {
            kind: "CategoryScoped".to_string(),
            scope: "FLIES_SPACESHIPS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "FLIES_SPACESHIPS is not a valid scope allowed for CategoryScoped"
        );
    }

    #[test]
    fn test_input_error_folds_into_role_error() {
        let input_err = InputResolutionError::MissingNestedKey {
            segment: "missing".to_string(),
        };
        let role_err = RoleError::from(input_err);
        assert!(role_err.to_string().contains("\"missing\""));
    }

    #[test]
    fn test_access_denied_converts_to_warden_error() {
        let denied = AccessDeniedError::new(vec![RoleFailure {
            role_kind: "OwnerMatch".to_string(),
            reason: "caller is not authenticated".to_string(),
        }]);
        let warden: WardenError = denied.into();
        let message = warden.to_string();
        assert!(message.contains("Permission denied"));
        assert!(message.contains("OwnerMatch"));
    }
}
