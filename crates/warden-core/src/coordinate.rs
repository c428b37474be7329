//! Schema coordinates for protected fields and types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a protected field or type in the host schema.
///
/// Rendered into audit records as `Type.field` (or just `Type` for
/// type-level policies). The engine never interprets the coordinate; it only
/// carries it through to the audit pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCoordinate {
    type_name: String,
    field_name: Option<String>,
}

impl SchemaCoordinate {
    /// Coordinate for a field-level policy.
    pub fn field(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: Some(field_name.into()),
        }
    }

    /// Coordinate for a type-level policy.
    pub fn type_level(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: None,
        }
    }

    /// Name of the containing type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the protected field, if this is a field coordinate.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }
}

impl fmt::Display for SchemaCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field_name {
            Some(field) => write!(f, "{}.{}", self.type_name, field),
            None => write!(f, "{}", self.type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_coordinate_display() {
        let coordinate = SchemaCoordinate::field("User", "password");
        assert_eq!(coordinate.to_string(), "User.password");
        assert_eq!(coordinate.field_name(), Some("password"));
    }

    #[test]
    fn test_type_coordinate_display() {
        let coordinate = SchemaCoordinate::type_level("CreditCardDetails");
        assert_eq!(coordinate.to_string(), "CreditCardDetails");
        assert!(coordinate.field_name().is_none());
    }
}
