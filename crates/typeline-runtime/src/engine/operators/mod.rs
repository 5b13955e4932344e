//! Operator evaluation
//!
//! Each operator family lives in its own module. Evaluation never fails:
//! unresolved fields, `NaN` coercions and unusable regexes all degrade to a
//! fixed boolean.

mod comparison;
mod existence;
mod membership;
mod text;

use typeline_core::{CompiledPattern, OperatorDefinition, OperatorKind, Value};

/// Evaluate one operator against a resolved field value.
///
/// `value` is `None` when the field did not resolve. For `~`/`!~` the raw
/// value is compiled here; conditions produced by the tokenizer carry a
/// precompiled pattern and go through [`apply`] instead.
pub fn evaluate_condition(value: Option<&Value>, operator: &OperatorDefinition, raw: &str) -> bool {
    let pattern = match operator.kind {
        OperatorKind::Matches | OperatorKind::NotMatches => {
            match CompiledPattern::from_literal(raw) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::debug!("Regex operand '{}' rejected: {}", raw, e);
                    None
                }
            }
        }
        _ => None,
    };
    apply(value, operator, raw, pattern.as_ref())
}

/// Evaluate with an already compiled pattern. For regex operators a `None`
/// pattern means the operand could not be compiled.
pub(crate) fn apply(
    value: Option<&Value>,
    operator: &OperatorDefinition,
    raw: &str,
    pattern: Option<&CompiledPattern>,
) -> bool {
    use OperatorKind::*;

    match operator.kind {
        Exists | NotExists | Empty | NotEmpty | Null | NotNull => {
            existence::evaluate(operator.kind, value)
        }
        Eq | Ne | Gt | Ge | Lt | Le => comparison::evaluate(operator.kind, value, raw),
        Matches | NotMatches => text::evaluate_pattern(operator.kind, value, pattern),
        Contains | NotContains | StartsWith | EndsWith => text::evaluate(operator.kind, value, raw),
        In | NotIn => membership::evaluate(operator.kind, value, raw),
    }
}

/// Stringified field value; an unresolved field reads as `undefined`
pub(crate) fn stringify(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_loose_string)
}
