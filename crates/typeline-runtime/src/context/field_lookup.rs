//! Field Lookup Utilities
//!
//! Walks a `FieldPath` through a nested payload. A missing key, an index on
//! a non-array, an out-of-range index or a `null` met before the last segment
//! all yield `None` ("unresolved"). Unresolved fields are not errors; the
//! existence operators and the optionality check consume them.

use typeline_core::{FieldPath, PathSegment, Value};

/// Resolve `path` against `data`
///
/// # Returns
/// * `Some(value)` - The value at the path. A `null` stored at the final
///   segment resolves to `Some(Value::Null)`.
/// * `None` - The path does not resolve
pub fn resolve<'a>(path: &FieldPath, data: &'a Value) -> Option<&'a Value> {
    let mut current = data;

    for segment in path.segments() {
        if current.is_null() {
            tracing::debug!("Null reached before end of path '{}', unresolved", path);
            return None;
        }

        let next = match (segment, current) {
            (PathSegment::Key(key) | PathSegment::Quoted(key), Value::Object(map)) => map.get(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            _ => {
                tracing::debug!(
                    "Cannot apply segment {:?} to {} in path '{}', unresolved",
                    segment,
                    current.type_name(),
                    path
                );
                return None;
            }
        };

        current = match next {
            Some(value) => value,
            None => {
                tracing::debug!("Field not found: {:?} in path '{}'", segment, path);
                return None;
            }
        };
    }

    Some(current)
}

/// Parse `path` and resolve it against `data`
pub fn resolve_str<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    resolve(&FieldPath::parse(path), data)
}
