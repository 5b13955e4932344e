//! Unit tests for the core grammar building blocks
//!
//! Exercises the operator registry, the condition tokenizer and descriptors
//! together through the public API.

use typeline_core::condition::tokenize;
use typeline_core::operator::{by_precedence, definition, lookup, supported_kinds};
use typeline_core::*;

// =============================================================================
// Operator Registry Tests
// =============================================================================

#[test]
fn test_registry_is_sorted_by_precedence() {
    let ranks: Vec<u16> = by_precedence().iter().map(|op| op.precedence).collect();
    let mut sorted = ranks.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ranks, sorted);
    assert_eq!(by_precedence().len(), 20);
}

#[test]
fn test_registry_lookup_round_trip() {
    for op in by_precedence() {
        assert_eq!(lookup(op.symbol).map(|d| d.kind), Some(op.kind));
        assert_eq!(definition(op.kind).map(|d| d.symbol), Some(op.symbol));
    }
    assert!(lookup("==").is_none());
}

#[test]
fn test_ordering_operators_apply_to_numbers_and_dates() {
    let kinds = supported_kinds(OperatorKind::Gt);
    assert!(kinds.contains(&DataKind::Number));
    assert!(kinds.contains(&DataKind::Date));
    assert!(!kinds.contains(&DataKind::Boolean));
}

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[test]
fn test_tokenize_nested_path_with_membership() {
    let expr = tokenize("user.roles[0] in [admin, owner]").unwrap();
    assert_eq!(
        expr.field.segments(),
        &[
            PathSegment::Key("user".to_string()),
            PathSegment::Key("roles".to_string()),
            PathSegment::Index(0),
        ]
    );
    assert_eq!(expr.operator.kind, OperatorKind::In);
    assert_eq!(expr.raw_value, "[admin, owner]");
}

#[test]
fn test_tokenize_every_registered_operator() {
    for op in by_precedence() {
        let text = if !op.requires_operand {
            format!("field {}", op.symbol)
        } else if op.is_word() {
            format!("field {} x", op.symbol)
        } else {
            format!("field{}x", op.symbol)
        };
        let expr = tokenize(&text).unwrap_or_else(|| panic!("failed on '{}'", text));
        assert_eq!(expr.operator.kind, op.kind, "wrong operator for '{}'", text);
        assert_eq!(expr.field.to_string(), "field");
    }
}

// =============================================================================
// Descriptor Tests
// =============================================================================

#[test]
fn test_descriptor_collects_condition_fields() {
    let descriptor: Descriptor = ConditionalRule::new(
        tokenize("country=US && age>=21").unwrap(),
        TypeSpecifier::base(BaseKind::Boolean).into(),
        TypeSpecifier::constant(Literal::Bool(false)).into(),
    )
    .into();

    let fields: Vec<String> = descriptor
        .referenced_fields()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(fields, vec!["country", "age"]);
    assert_eq!(
        descriptor.to_string(),
        "when country=US && age>=21 *? boolean : =false"
    );
}
