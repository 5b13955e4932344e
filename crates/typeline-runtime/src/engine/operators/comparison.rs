//! Comparison operators
//!
//! `=`/`!=` compare stringified values, so `0` equals `"0"`. The ordering
//! operators coerce both sides to numbers and are false when either side is
//! `NaN`.

use super::stringify;
use typeline_core::types::value::coerce_number_str;
use typeline_core::{OperatorKind, Value};

pub(super) fn evaluate(kind: OperatorKind, value: Option<&Value>, raw: &str) -> bool {
    match kind {
        OperatorKind::Eq => stringify(value) == raw,
        OperatorKind::Ne => stringify(value) != raw,
        OperatorKind::Gt | OperatorKind::Ge | OperatorKind::Lt | OperatorKind::Le => {
            compare_numbers(kind, value, raw)
        }
        _ => false,
    }
}

fn compare_numbers(kind: OperatorKind, value: Option<&Value>, raw: &str) -> bool {
    let left = value.map_or(f64::NAN, Value::to_loose_number);
    let right = coerce_number_str(raw);

    if left.is_nan() || right.is_nan() {
        tracing::debug!(
            "Numeric comparison on NaN ({} {:?} {}), returning false",
            stringify(value),
            kind,
            raw
        );
        return false;
    }

    match kind {
        OperatorKind::Gt => left > right,
        OperatorKind::Ge => left >= right,
        OperatorKind::Lt => left < right,
        OperatorKind::Le => left <= right,
        _ => false,
    }
}
