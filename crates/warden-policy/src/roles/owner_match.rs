//! Ownership-match role.

use crate::errors::RoleError;
use crate::role::{subject_str, subject_value, RoleCheck};
use serde_json::Value;
use std::collections::BTreeSet;
use warden_core::RequestContext;

/// Default attribute naming the owning principal on protected source values.
pub const DEFAULT_COMPARISON_KEY: &str = "owner_id";

/// Grants access when the authenticated caller owns the protected value.
///
/// The subject id is read from the resolved input argument when one is
/// configured, otherwise from the comparison attribute of the source value.
/// Accepts no scopes.
#[derive(Debug, Clone)]
pub struct OwnerMatch {
    comparison_key: String,
}

impl OwnerMatch {
    /// Owner match against the default `owner_id` attribute.
    pub fn new() -> Self {
        Self::with_comparison_key(DEFAULT_COMPARISON_KEY)
    }

    /// Owner match against a custom source attribute.
    pub fn with_comparison_key(key: impl Into<String>) -> Self {
        Self {
            comparison_key: key.into(),
        }
    }
}

impl Default for OwnerMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleCheck for OwnerMatch {
    fn kind(&self) -> &str {
        "OwnerMatch"
    }

    fn owner(&self) -> &str {
        "identity-platform"
    }

    fn comparison_key(&self) -> Option<&str> {
        Some(&self.comparison_key)
    }

    fn validate(
        &self,
        _scopes: Option<&BTreeSet<String>>,
        source: &Value,
        context: &RequestContext,
        input_arg: Option<&Value>,
    ) -> Result<(), RoleError> {
        let principal = context.principal_id().ok_or(RoleError::NotAuthenticated)?;

        let subject = subject_value(&self.comparison_key, source, input_arg)?;
        let subject_id = subject_str(&self.comparison_key, subject)?;

        if subject_id != principal {
            return Err(RoleError::PrincipalMismatch);
        }

        Ok(())
    }
}
