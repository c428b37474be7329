//! Built-in role variants.
//!
//! New variants are added by implementing [`RoleCheck`](crate::RoleCheck)
//! and registering the kind in [`registry`](crate::registry); the engine
//! itself never needs to change.

pub mod category_scoped;
pub mod owner_match;

pub use category_scoped::CategoryScoped;
pub use owner_match::OwnerMatch;
