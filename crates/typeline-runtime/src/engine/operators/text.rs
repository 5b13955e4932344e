//! String operators: substring, prefix, suffix and regex matching

use super::stringify;
use typeline_core::{CompiledPattern, OperatorKind, Value};

pub(super) fn evaluate(kind: OperatorKind, value: Option<&Value>, raw: &str) -> bool {
    let text = stringify(value);
    match kind {
        OperatorKind::Contains => text.contains(raw),
        OperatorKind::NotContains => !text.contains(raw),
        OperatorKind::StartsWith => text.starts_with(raw),
        OperatorKind::EndsWith => text.ends_with(raw),
        _ => false,
    }
}

/// `~` is false and `!~` is true when there is no usable pattern
pub(super) fn evaluate_pattern(
    kind: OperatorKind,
    value: Option<&Value>,
    pattern: Option<&CompiledPattern>,
) -> bool {
    let negated = kind == OperatorKind::NotMatches;
    match pattern {
        Some(pattern) => pattern.is_match(&stringify(value)) != negated,
        None => {
            tracing::debug!("No usable regex for {:?}, returning {}", kind, negated);
            negated
        }
    }
}
