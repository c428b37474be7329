//! # Warden Core - Shared Authorization Types
//!
//! Leaf crate for the Warden field-level authorization engine: the unified
//! error type, the per-request context carrying caller identity and claims,
//! and the schema coordinate used to locate protected fields in audit output.

pub mod context;
pub mod coordinate;
pub mod errors;

pub use context::RequestContext;
pub use coordinate::SchemaCoordinate;
pub use errors::{Result, WardenError};
