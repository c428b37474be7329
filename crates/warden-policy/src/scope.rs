//! Construction-time scope validation.

use crate::errors::ConstructionError;
use std::collections::BTreeSet;

/// Check a requested scope selection against a role's declared universe.
///
/// Invoked by [`RoleBuilder::build`](crate::role::RoleBuilder::build); has no
/// runtime cost after construction. Rejects supplying scopes to a role whose
/// universe is `None`, an explicitly empty selection, and any scope outside
/// the universe.
pub fn validate_scope_selection(
    kind: &str,
    universe: Option<&BTreeSet<String>>,
    requested: Option<&BTreeSet<String>>,
) -> Result<(), ConstructionError> {
    let Some(requested) = requested else {
        return Ok(());
    };

    let Some(universe) = universe else {
        return Err(ConstructionError::ScopesNotAccepted {
            kind: kind.to_string(),
        });
    };

    if requested.is_empty() {
        return Err(ConstructionError::EmptyScopeSelection {
            kind: kind.to_string(),
        });
    }

    for scope in requested {
        if !universe.contains(scope) {
            return Err(ConstructionError::UnknownScope {
                kind: kind.to_string(),
                scope: scope.clone(),
            });
        }
    }

    Ok(())
}
