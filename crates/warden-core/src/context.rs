//! Per-request caller context.
//!
//! Design intent:
//! - Identity and claims arrive here pre-resolved by the host; the engine
//!   never talks to an identity provider.
//! - The engine reads only `trace_id` and `principal_id`. Category claim
//!   sets are consumed by specific role variants, never by the evaluator.
//! - One `RequestContext` is created per request and shared read-only with
//!   every field evaluation in that request.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Caller identity and claims for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    trace_id: String,
    principal_id: Option<String>,
    category_claims: HashMap<String, BTreeSet<String>>,
}

impl RequestContext {
    /// Create a context for an unauthenticated caller.
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            principal_id: None,
            category_claims: HashMap::new(),
        }
    }

    /// Create a context for an authenticated caller.
    pub fn authenticated(trace_id: impl Into<String>, principal_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            principal_id: Some(principal_id.into()),
            category_claims: HashMap::new(),
        }
    }

    /// Attach the claim set granted to the caller for one category.
    ///
    /// Consumed by scope-checking role variants via [`category_claims`].
    ///
    /// [`category_claims`]: RequestContext::category_claims
    pub fn with_claims(
        mut self,
        category: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.category_claims.insert(
            category.into(),
            scopes.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Correlation id threaded into every audit record.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Authenticated caller id, if the caller is logged in.
    pub fn principal_id(&self) -> Option<&str> {
        self.principal_id.as_deref()
    }

    /// Claim set granted to the caller for a category, if any.
    pub fn category_claims(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.category_claims.get(category)
    }
}
