//! Existence operators: `exists`, `empty`, `null` and their negations

use typeline_core::{OperatorKind, Value};

pub(super) fn evaluate(kind: OperatorKind, value: Option<&Value>) -> bool {
    match kind {
        OperatorKind::Exists => exists(value),
        OperatorKind::NotExists => !exists(value),
        OperatorKind::Empty => is_empty(value),
        OperatorKind::NotEmpty => !is_empty(value),
        OperatorKind::Null => is_null(value),
        OperatorKind::NotNull => !is_null(value),
        _ => false,
    }
}

/// Resolved and not null
fn exists(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Empty string, array or object. Scalars, `null` and unresolved fields are not empty.
fn is_empty(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_empty_container)
}

/// Strictly `null`; an unresolved field is not null
fn is_null(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Null))
}
