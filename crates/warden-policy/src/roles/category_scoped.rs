//! Category-scoped membership role.

use crate::errors::RoleError;
use crate::role::{subject_str, subject_value, RoleCheck};
use serde_json::Value;
use std::collections::BTreeSet;
use warden_core::RequestContext;

/// Default attribute naming the subject's category on protected values.
pub const DEFAULT_COMPARISON_KEY: &str = "category";

/// Grants access when the subject belongs to an expected category and the
/// caller holds at least one of the applied scopes for that category.
///
/// Must be instantiated with a non-empty scope selection drawn from the
/// universe supplied at construction; a role wired up without scopes fails
/// every evaluation regardless of context. Multiple applied scopes are
/// evaluated with OR logic against the caller's per-category claim set.
#[derive(Debug, Clone)]
pub struct CategoryScoped {
    category: String,
    comparison_key: String,
    universe: BTreeSet<String>,
}

impl CategoryScoped {
    /// Scoped check for one category, with the set of scopes instantiations
    /// may choose from.
    pub fn new(
        category: impl Into<String>,
        universe: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            category: category.into(),
            comparison_key: DEFAULT_COMPARISON_KEY.to_string(),
            universe: universe.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the subject's category from a custom source attribute.
    pub fn with_comparison_key(mut self, key: impl Into<String>) -> Self {
        self.comparison_key = key.into();
        self
    }

    /// Category this check expects the subject to belong to.
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl RoleCheck for CategoryScoped {
    fn kind(&self) -> &str {
        "CategoryScoped"
    }

    fn owner(&self) -> &str {
        "identity-platform"
    }

    fn scope_universe(&self) -> Option<&BTreeSet<String>> {
        Some(&self.universe)
    }

    fn comparison_key(&self) -> Option<&str> {
        Some(&self.comparison_key)
    }

    fn validate(
        &self,
        scopes: Option<&BTreeSet<String>>,
        source: &Value,
        context: &RequestContext,
        input_arg: Option<&Value>,
    ) -> Result<(), RoleError> {
        // Re-checked at evaluation time: construction validates the subset
        // relation but cannot force callers to apply scopes at all.
        let scopes = match scopes {
            Some(scopes) if !scopes.is_empty() => scopes,
            _ => {
                return Err(RoleError::ScopesRequired {
                    kind: self.kind().to_string(),
                })
            }
        };

        let subject = subject_value(&self.comparison_key, source, input_arg)?;
        let category = subject_str(&self.comparison_key, subject)?;

        if category != self.category {
            return Err(RoleError::CategoryMismatch {
                expected: self.category.clone(),
                actual: category.to_string(),
            });
        }

        let claims =
            context
                .category_claims(&self.category)
                .ok_or_else(|| RoleError::ClaimsUnavailable {
                    category: self.category.clone(),
                })?;

        if scopes.iter().any(|scope| claims.contains(scope)) {
            Ok(())
        } else {
            Err(RoleError::NoMatchingScope)
        }
    }
}
