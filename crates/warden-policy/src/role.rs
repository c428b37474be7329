//! Role capability contract.
//!
//! A role is one pluggable authorization check. The check logic lives behind
//! the object-safe [`RoleCheck`] trait; a [`Role`] pairs one check with the
//! configuration chosen at instantiation (applied scopes, input-argument
//! path) and is immutable from then on, shared read-only across requests.

use crate::errors::{ConstructionError, RoleError};
use crate::scope::validate_scope_selection;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use warden_core::RequestContext;

/// One authorization check variant.
///
/// Implementations must be side-effect free and cheap enough to run
/// sequentially on every protected field. `validate` returns `Ok(())` on
/// success or a [`RoleError`] naming the reason; there is no boolean
/// outcome, so a check that cannot be satisfied always carries a reason.
pub trait RoleCheck: fmt::Debug + Send + Sync {
    /// Stable discriminant naming this check in audit records and renderings.
    fn kind(&self) -> &str;

    /// Team that maintains this check. Must be non-empty.
    fn owner(&self) -> &str;

    /// Scopes this check can be instantiated with; `None` means the check
    /// never accepts scopes.
    fn scope_universe(&self) -> Option<&BTreeSet<String>> {
        None
    }

    /// Source attribute read when no input argument is configured.
    fn comparison_key(&self) -> Option<&str> {
        None
    }

    /// Run the check against one request.
    fn validate(
        &self,
        scopes: Option<&BTreeSet<String>>,
        source: &Value,
        context: &RequestContext,
        input_arg: Option<&Value>,
    ) -> Result<(), RoleError>;
}

/// A concrete, instantiated role: one check plus its applied configuration.
#[derive(Debug, Clone)]
pub struct Role {
    check: Arc<dyn RoleCheck>,
    applied_scopes: Option<BTreeSet<String>>,
    input_arg: Option<String>,
}

/// Builder validating a role's configuration at construction time.
#[derive(Debug)]
pub struct RoleBuilder {
    check: Arc<dyn RoleCheck>,
    scopes: Option<BTreeSet<String>>,
    input_arg: Option<String>,
}

impl Role {
    /// Instantiate a role with no scopes and no input argument.
    pub fn new(check: impl RoleCheck + 'static) -> Result<Self, ConstructionError> {
        Self::builder(check).build()
    }

    /// Start building a role with explicit configuration.
    pub fn builder(check: impl RoleCheck + 'static) -> RoleBuilder {
        RoleBuilder {
            check: Arc::new(check),
            scopes: None,
            input_arg: None,
        }
    }

    /// Kind discriminant of the underlying check.
    pub fn kind(&self) -> &str {
        self.check.kind()
    }

    /// Maintaining team of the underlying check.
    pub fn owner(&self) -> &str {
        self.check.owner()
    }

    /// Scopes chosen at instantiation, if any.
    pub fn applied_scopes(&self) -> Option<&BTreeSet<String>> {
        self.applied_scopes.as_ref()
    }

    /// Input-argument path read instead of the comparison key, if configured.
    pub fn input_arg(&self) -> Option<&str> {
        self.input_arg.as_deref()
    }

    /// Comparison key of the underlying check.
    pub fn comparison_key(&self) -> Option<&str> {
        self.check.comparison_key()
    }

    /// Scope universe of the underlying check.
    pub fn scope_universe(&self) -> Option<&BTreeSet<String>> {
        self.check.scope_universe()
    }

    /// Run the underlying check with this role's applied configuration.
    pub fn validate(
        &self,
        source: &Value,
        context: &RequestContext,
        input_arg: Option<&Value>,
    ) -> Result<(), RoleError> {
        self.check
            .validate(self.applied_scopes.as_ref(), source, context, input_arg)
    }
}

impl RoleBuilder {
    /// Apply a scope selection. Validated against the check's universe at
    /// build time.
    pub fn scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Read the subject from a dynamic argument path instead of the
    /// comparison key. Plain key, or `input.`-prefixed dotted path for
    /// nested input containers.
    pub fn input_arg(mut self, path: impl Into<String>) -> Self {
        self.input_arg = Some(path.into());
        self
    }

    /// Validate the configuration and produce an immutable [`Role`].
    pub fn build(self) -> Result<Role, ConstructionError> {
        if self.check.kind().is_empty() {
            return Err(ConstructionError::MissingKind);
        }
        if self.check.owner().is_empty() {
            return Err(ConstructionError::MissingOwner {
                kind: self.check.kind().to_string(),
            });
        }
        validate_scope_selection(
            self.check.kind(),
            self.check.scope_universe(),
            self.scopes.as_ref(),
        )?;

        Ok(Role {
            check: self.check,
            applied_scopes: self.scopes,
            input_arg: self.input_arg,
        })
    }
}

/// Read the subject value for a check: the resolved input argument when one
/// was supplied, otherwise the comparison attribute off the source value.
pub(crate) fn subject_value<'a>(
    key: &str,
    source: &'a Value,
    input_arg: Option<&'a Value>,
) -> Result<&'a Value, RoleError> {
    if let Some(value) = input_arg {
        return Ok(value);
    }

    let attributes = source.as_object().ok_or_else(|| RoleError::InvalidAttribute {
        key: key.to_string(),
        reason: "source value is not an object".to_string(),
    })?;

    attributes.get(key).ok_or_else(|| RoleError::AttributeNotFound {
        key: key.to_string(),
    })
}

/// Extract a string subject, failing with the comparison key's name when the
/// value has the wrong shape.
pub(crate) fn subject_str<'a>(key: &str, value: &'a Value) -> Result<&'a str, RoleError> {
    value.as_str().ok_or_else(|| RoleError::InvalidAttribute {
        key: key.to_string(),
        reason: "expected a string value".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct AlwaysPasses;

    impl RoleCheck for AlwaysPasses {
        fn kind(&self) -> &str {
            "AlwaysPasses"
        }

        fn owner(&self) -> &str {
            "test-team"
        }

        fn validate(
            &self,
            _scopes: Option<&BTreeSet<String>>,
            _source: &Value,
            _context: &RequestContext,
            _input_arg: Option<&Value>,
        ) -> Result<(), RoleError> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Anonymous;

    impl RoleCheck for Anonymous {
        fn kind(&self) -> &str {
            "Anonymous"
        }

        fn owner(&self) -> &str {
            ""
        }

        fn validate(
            &self,
            _scopes: Option<&BTreeSet<String>>,
            _source: &Value,
            _context: &RequestContext,
            _input_arg: Option<&Value>,
        ) -> Result<(), RoleError> {
            Ok(())
        }
    }

    #[test]
    fn test_role_without_scopes_builds() {
        let role = Role::new(AlwaysPasses).unwrap();
        assert_eq!(role.kind(), "AlwaysPasses");
        assert!(role.applied_scopes().is_none());
        assert!(role.input_arg().is_none());
    }

    #[test]
    fn test_scopes_rejected_when_universe_is_none() {
        let err = Role::builder(AlwaysPasses).scopes(["A"]).build();
        assert!(matches!(
            err,
            Err(ConstructionError::ScopesNotAccepted { .. })
        ));
    }

    #[test]
    fn test_missing_owner_rejected() {
        let err = Role::new(Anonymous);
        assert!(matches!(err, Err(ConstructionError::MissingOwner { .. })));
    }

    #[test]
    fn test_subject_value_prefers_input_arg() {
        let source = json!({ "owner_id": "from_source" });
        let input = json!("from_input");

        let value = subject_value("owner_id", &source, Some(&input)).unwrap();
        assert_eq!(value, &json!("from_input"));

        let value = subject_value("owner_id", &source, None).unwrap();
        assert_eq!(value, &json!("from_source"));
    }

    #[test]
    fn test_subject_value_missing_attribute() {
        let source = json!({ "other": 1 });
        let err = subject_value("owner_id", &source, None);
        assert!(matches!(err, Err(RoleError::AttributeNotFound { .. })));
    }

    #[test]
    fn test_subject_str_rejects_non_strings() {
        let value = json!(42);
        let err = subject_str("owner_id", &value);
        assert!(matches!(err, Err(RoleError::InvalidAttribute { .. })));
    }
}
