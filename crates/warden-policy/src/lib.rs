//! # Warden Policy - Field-Level Authorization Engine
//!
//! Declarative access control for typed query-serving APIs: hosts attach a
//! [`Policy`] (an ordered list of [`Role`]s combined with all/any logic) to
//! a protected field or type at schema build time, then call
//! [`PolicyEvaluator::check_policy`] as a synchronous gate before producing
//! each protected value. Every evaluation emits one [`EvaluationRecord`] to
//! the configured [`AuditSink`]; denials surface as a single
//! [`AccessDeniedError`] scoped to the protected field.
//!
//! ```
//! use serde_json::{json, Map};
//! use warden_core::{RequestContext, SchemaCoordinate};
//! use warden_policy::roles::OwnerMatch;
//! use warden_policy::{build_policy, AppliedTo, PolicyEvaluator, PolicyRoles, Role};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Schema build time: wire a policy onto a protected field.
//! let role = Role::new(OwnerMatch::new())?;
//! let policy = build_policy(AppliedTo::Field, PolicyRoles::Single(role))?;
//!
//! // Request time: gate the field resolver.
//! let evaluator = PolicyEvaluator::new();
//! let context = RequestContext::authenticated("trace-1", "abc123");
//! let source = json!({ "owner_id": "abc123" });
//!
//! evaluator.check_policy(
//!     &policy,
//!     &SchemaCoordinate::field("User", "password"),
//!     &source,
//!     &context,
//!     &Map::new(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod errors;
pub mod evaluation;
pub mod input;
pub mod policy;
pub mod registry;
pub mod render;
pub mod role;
pub mod roles;
pub mod scope;

pub use audit::{AppliedRole, AuditSink, Decision, EvaluationRecord, MemoryAuditSink, TracingAuditSink};
pub use errors::{
    AccessDeniedError, ConstructionError, InputResolutionError, RoleError, RoleFailure,
};
pub use evaluation::PolicyEvaluator;
pub use input::resolve_input_arg;
pub use policy::{build_policy, AppliedTo, EvaluationLogic, Policy, PolicyRoles};
pub use registry::{builtin_roles, RoleDescriptor};
pub use render::{policy_description, policy_metadata, render_role, PolicyMetadata, RoleMetadata};
pub use role::{Role, RoleBuilder, RoleCheck};
