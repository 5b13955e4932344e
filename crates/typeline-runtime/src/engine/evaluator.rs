//! Condition and rule evaluation

use super::operators::apply;
use crate::context::resolve;
use typeline_core::{ConditionExpression, ConditionalRule, Descriptor, TypeSpecifier, Value};

/// Evaluate a condition against the payload.
///
/// Chains are folded strictly left to right with no precedence between
/// `&&` and `||`, and every predicate is evaluated.
pub fn evaluate_expression(expr: &ConditionExpression, data: &Value) -> bool {
    let mut result = evaluate_predicate(expr, data);
    for (connector, next) in &expr.chain {
        let rhs = evaluate_predicate(next, data);
        result = connector.apply(result, rhs);
    }
    result
}

fn evaluate_predicate(expr: &ConditionExpression, data: &Value) -> bool {
    let value = resolve(&expr.field, data);
    let outcome = apply(value, expr.operator, &expr.raw_value, expr.pattern.as_ref());
    tracing::trace!(
        "Condition '{}{}{}' -> {}",
        expr.field,
        expr.operator,
        expr.raw_value,
        outcome
    );
    outcome
}

/// Evaluate a rule and return the type specifier of the branch it selects,
/// descending through nested rules
pub fn evaluate_rule<'a>(rule: &'a ConditionalRule, data: &Value) -> &'a TypeSpecifier {
    let branch = if evaluate_expression(&rule.condition, data) {
        &rule.then_branch
    } else {
        &rule.else_branch
    };
    select_branch(branch, data)
}

/// Type specifier a descriptor resolves to for this payload
pub fn select_branch<'a>(descriptor: &'a Descriptor, data: &Value) -> &'a TypeSpecifier {
    match descriptor {
        Descriptor::Type(spec) => spec,
        Descriptor::Rule(rule) => evaluate_rule(rule, data),
    }
}
