//! Process-wide role registration table.
//!
//! The set of deployable role kinds is assembled once at startup and never
//! mutated afterwards; hosts read it to enumerate roles for documentation or
//! schema metadata.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use warden_core::{Result, WardenError};

/// Static description of one registered role variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    /// Kind discriminant, as it appears in audit records
    pub kind: String,
    /// Maintaining team
    pub owner: String,
    /// Whether instantiations of this variant may apply scopes
    pub accepts_scopes: bool,
    /// Default comparison key read off protected source values
    pub comparison_key: Option<String>,
}

static BUILTIN_ROLES: OnceLock<Vec<RoleDescriptor>> = OnceLock::new();

/// The built-in role variants shipped with the engine.
///
/// Built once, immutable after first access.
pub fn builtin_roles() -> &'static [RoleDescriptor] {
    BUILTIN_ROLES.get_or_init(|| {
        vec![
            RoleDescriptor {
                kind: "OwnerMatch".to_string(),
                owner: "identity-platform".to_string(),
                accepts_scopes: false,
                comparison_key: Some(crate::roles::owner_match::DEFAULT_COMPARISON_KEY.to_string()),
            },
            RoleDescriptor {
                kind: "CategoryScoped".to_string(),
                owner: "identity-platform".to_string(),
                accepts_scopes: true,
                comparison_key: Some(
                    crate::roles::category_scoped::DEFAULT_COMPARISON_KEY.to_string(),
                ),
            },
        ]
    })
}

/// Whether a kind discriminant names a registered built-in variant.
pub fn is_registered(kind: &str) -> bool {
    builtin_roles().iter().any(|role| role.kind == kind)
}

/// Well-formedness check over the registration table: every entry carries a
/// non-empty kind and owner, and kinds are unique.
pub fn verify() -> Result<()> {
    let roles = builtin_roles();
    for role in roles {
        if role.kind.is_empty() {
            return Err(WardenError::internal("registered role with empty kind"));
        }
        if role.owner.is_empty() {
            return Err(WardenError::internal(format!(
                "registered role {} has no owner",
                role.kind
            )));
        }
    }
    for (index, role) in roles.iter().enumerate() {
        if roles[index + 1..].iter().any(|other| other.kind == role.kind) {
            return Err(WardenError::internal(format!(
                "duplicate registered role kind {}",
                role.kind
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roles_are_well_formed() {
        assert!(verify().is_ok());
        assert!(!builtin_roles().is_empty());
    }

    #[test]
    fn test_builtin_kinds_registered() {
        assert!(is_registered("OwnerMatch"));
        assert!(is_registered("CategoryScoped"));
        assert!(!is_registered("NoSuchRole"));
    }

    #[test]
    fn test_table_is_stable_across_calls() {
        let first: *const _ = builtin_roles();
        let second: *const _ = builtin_roles();
        assert_eq!(first, second);
    }
}
