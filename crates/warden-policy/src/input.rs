//! Input-argument resolution.
//!
//! When a role declares an input-argument path, the subject is read from the
//! caller's raw arguments instead of the source value (the mutation-style
//! shape: authorization depends on what the caller is asking for, not on
//! what is being returned).
//!
//! Two path forms are supported:
//! - `"user_id"` — a plain top-level resolver argument.
//! - `"input.user_id"` — a dotted key into the single nested input
//!   container found under the `"input"` argument, as produced by
//!   structured-mutation call shapes.

use crate::errors::InputResolutionError;
use serde_json::{Map, Value};

/// Key under which structured-mutation hosts nest their input container.
pub const INPUT_CONTAINER_KEY: &str = "input";

const INPUT_PREFIX: &str = "input.";

/// Resolve a declared argument path against the raw argument map.
///
/// A missing key and an explicit JSON `null` are both resolution failures;
/// authorization never runs against an absent subject value.
pub fn resolve_input_arg(
    path: &str,
    raw_inputs: &Map<String, Value>,
) -> Result<Value, InputResolutionError> {
    if let Some(nested_path) = path.strip_prefix(INPUT_PREFIX) {
        return resolve_nested(path, nested_path, raw_inputs);
    }

    if path.contains('.') {
        return Err(InputResolutionError::NestedPathWithoutContainer {
            path: path.to_string(),
        });
    }

    match raw_inputs.get(path) {
        None => Err(InputResolutionError::MissingArgument {
            name: path.to_string(),
        }),
        Some(Value::Null) => Err(InputResolutionError::NullArgument {
            name: path.to_string(),
        }),
        Some(value) => Ok(value.clone()),
    }
}

fn resolve_nested(
    full_path: &str,
    nested_path: &str,
    raw_inputs: &Map<String, Value>,
) -> Result<Value, InputResolutionError> {
    let container =
        raw_inputs
            .get(INPUT_CONTAINER_KEY)
            .ok_or_else(|| InputResolutionError::MissingArgument {
                name: INPUT_CONTAINER_KEY.to_string(),
            })?;

    let mut current = container;
    for segment in nested_path.split('.') {
        current = current
            .as_object()
            .and_then(|object| object.get(segment))
            .ok_or_else(|| InputResolutionError::MissingNestedKey {
                segment: segment.to_string(),
            })?;
    }

    if current.is_null() {
        return Err(InputResolutionError::NullArgument {
            name: full_path.to_string(),
        });
    }

    Ok(current.clone())
}
