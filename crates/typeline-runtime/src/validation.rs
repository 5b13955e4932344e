//! Type validation
//!
//! Checks a value against a `TypeSpecifier`. Checks run in a fixed order and
//! the first failure is reported:
//!
//! 1. Optionality: a missing or `null` value passes iff the type is optional
//! 2. Constant: exact match against the literal
//! 3. Union: a literal member matches the stringified value, a type member
//!    matches when the value validates against it
//! 4. Base kind: kind check, then the constraint (string length, numeric
//!    range or regex). Arrays check the item count first, then every element.
//!
//! `FieldValidator` adds conditional descriptors on top: it selects the
//! branch for the payload, then validates the field's value against it.

use crate::context::resolve;
use crate::engine::evaluate_expression;
use crate::result::{IssueCode, ResultBuilder, ValidationIssue, ValidationResult};
use chrono::{DateTime, NaiveDate};
use typeline_core::types::value::format_number;
use typeline_core::{
    BaseKind, Bounds, ConditionalRule, Constraint, Descriptor, FieldPath, Literal, SpecifierForm,
    TypeSpecifier, UnionMember, Value,
};

/// Path reported for a value validated on its own
pub const ROOT_PATH: &str = "$";

type Check = std::result::Result<(), ValidationIssue>;

/// Validate a standalone value. `None` means the value is missing.
pub fn validate(spec: &TypeSpecifier, value: Option<&Value>) -> ValidationResult {
    validate_at(ROOT_PATH, spec, value)
}

/// Validate a value, reporting issues at `path`
pub fn validate_at(path: &str, spec: &TypeSpecifier, value: Option<&Value>) -> ValidationResult {
    let Some(present) = value.filter(|v| !v.is_null()) else {
        if spec.optional {
            return ValidationResult::success(None);
        }
        let mut issue = ValidationIssue::new(
            path,
            IssueCode::Required,
            format!("value is required, expected {}", spec.expected()),
        )
        .with_expected(spec.expected());
        if value.is_some() {
            issue = issue.with_actual("null");
        }
        return ValidationResult::failure(issue);
    };

    match check(path, spec, present) {
        Ok(()) => ValidationResult::success(Some(present.clone())),
        Err(issue) => ValidationResult::failure(issue),
    }
}

fn check(path: &str, spec: &TypeSpecifier, value: &Value) -> Check {
    match &spec.form {
        SpecifierForm::Constant(literal) => check_constant(path, literal, value),
        SpecifierForm::Union(members) => check_union(path, spec, members, value),
        SpecifierForm::Base(kind) => match &spec.array {
            Some(bounds) => check_array(path, spec, *kind, bounds, value),
            None => check_scalar(path, spec, *kind, value, &spec.expected()),
        },
    }
}

fn check_constant(path: &str, literal: &Literal, value: &Value) -> Check {
    if literal.matches(value) {
        return Ok(());
    }
    Err(ValidationIssue::new(
        path,
        IssueCode::ConstantMismatch,
        format!("expected constant {}, got {}", literal, render(value)),
    )
    .with_expected(format!("={}", literal))
    .with_actual(render(value)))
}

fn check_union(path: &str, spec: &TypeSpecifier, members: &[UnionMember], value: &Value) -> Check {
    let matched = members.iter().any(|member| match member {
        UnionMember::Literal(literal) => value.to_loose_string() == *literal,
        UnionMember::Type(member) => check(path, member, value).is_ok(),
    });
    if matched {
        return Ok(());
    }
    Err(ValidationIssue::new(
        path,
        IssueCode::NotInUnion,
        format!("value {} matches none of {}", render(value), spec.expected()),
    )
    .with_expected(spec.expected())
    .with_actual(render(value)))
}

fn check_array(
    path: &str,
    spec: &TypeSpecifier,
    kind: BaseKind,
    bounds: &Bounds,
    value: &Value,
) -> Check {
    let Value::Array(items) = value else {
        return Err(mismatch(path, &spec.expected(), value));
    };

    let count = items.len() as f64;
    if let Some(min) = bounds.min {
        if count < min {
            return Err(ValidationIssue::new(
                path,
                IssueCode::TooFewItems,
                format!("expected at least {} items, got {}", format_number(min), items.len()),
            )
            .with_expected(spec.expected())
            .with_actual(items.len().to_string()));
        }
    }
    if let Some(max) = bounds.max {
        if count > max {
            return Err(ValidationIssue::new(
                path,
                IssueCode::TooManyItems,
                format!("expected at most {} items, got {}", format_number(max), items.len()),
            )
            .with_expected(spec.expected())
            .with_actual(items.len().to_string()));
        }
    }

    let element = element_expected(spec);
    for (index, item) in items.iter().enumerate() {
        check_scalar(&format!("{}[{}]", path, index), spec, kind, item, &element)?;
    }
    Ok(())
}

fn check_scalar(
    path: &str,
    spec: &TypeSpecifier,
    kind: BaseKind,
    value: &Value,
    expected: &str,
) -> Check {
    check_kind(path, kind, value, expected)?;

    match (&spec.constraint, value) {
        (Some(Constraint::Range(bounds)), Value::String(text)) => {
            check_length(path, bounds, text.chars().count(), expected)
        }
        (Some(Constraint::Range(bounds)), Value::Number(n)) => {
            check_range(path, bounds, *n, expected)
        }
        (Some(Constraint::Pattern(pattern)), Value::String(text)) => {
            if pattern.is_match(text) {
                Ok(())
            } else {
                Err(ValidationIssue::new(
                    path,
                    IssueCode::PatternMismatch,
                    format!("value {} does not match {}", render(value), pattern),
                )
                .with_expected(expected)
                .with_actual(render(value)))
            }
        }
        _ => Ok(()),
    }
}

fn check_kind(path: &str, kind: BaseKind, value: &Value, expected: &str) -> Check {
    let ok = match (kind, value) {
        (BaseKind::String, Value::String(_)) => true,
        (BaseKind::Number, Value::Number(n)) => !n.is_nan(),
        (BaseKind::Boolean, Value::Bool(_)) => true,
        (BaseKind::Date, Value::String(text)) => {
            if is_date(text) {
                true
            } else {
                return Err(ValidationIssue::new(
                    path,
                    IssueCode::InvalidDate,
                    format!("'{}' is not a valid date", text),
                )
                .with_expected(expected)
                .with_actual(render(value)));
            }
        }
        (BaseKind::Object | BaseKind::Record, Value::Object(_)) => true,
        (BaseKind::Any, value) => !value.is_null(),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(mismatch(path, expected, value))
    }
}

fn check_length(path: &str, bounds: &Bounds, length: usize, expected: &str) -> Check {
    let len = length as f64;
    if let Some(min) = bounds.min {
        if len < min {
            return Err(ValidationIssue::new(
                path,
                IssueCode::TooShort,
                format!("length {} is below minimum length {}", length, format_number(min)),
            )
            .with_expected(expected)
            .with_actual(length.to_string()));
        }
    }
    if let Some(max) = bounds.max {
        if len > max {
            return Err(ValidationIssue::new(
                path,
                IssueCode::TooLong,
                format!("length {} exceeds maximum length {}", length, format_number(max)),
            )
            .with_expected(expected)
            .with_actual(length.to_string()));
        }
    }
    Ok(())
}

fn check_range(path: &str, bounds: &Bounds, n: f64, expected: &str) -> Check {
    if let Some(min) = bounds.min {
        if n < min {
            return Err(ValidationIssue::new(
                path,
                IssueCode::BelowMinimum,
                format!("value {} is below minimum {}", format_number(n), format_number(min)),
            )
            .with_expected(expected)
            .with_actual(format_number(n)));
        }
    }
    if let Some(max) = bounds.max {
        if n > max {
            return Err(ValidationIssue::new(
                path,
                IssueCode::AboveMaximum,
                format!("value {} exceeds maximum {}", format_number(n), format_number(max)),
            )
            .with_expected(expected)
            .with_actual(format_number(n)));
        }
    }
    Ok(())
}

fn mismatch(path: &str, expected: &str, value: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path,
        IssueCode::TypeMismatch,
        format!("expected {}, got {}", expected, value.type_name()),
    )
    .with_expected(expected)
    .with_actual(render(value))
}

/// Expected text for one element of an array type
fn element_expected(spec: &TypeSpecifier) -> String {
    let mut element = spec.clone();
    element.array = None;
    element.optional = false;
    element.to_string()
}

fn is_date(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// Short rendering of a value for messages
fn render(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_loose_string()),
    }
}

/// Validates one schema field: selects the branch of a conditional
/// descriptor for the payload, then validates the field's value against it
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    warn_unresolved: bool,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self {
            warn_unresolved: true,
        }
    }
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn when a condition compares a field that does not resolve
    pub fn with_warn_unresolved(mut self, warn: bool) -> Self {
        self.warn_unresolved = warn;
        self
    }

    /// Validate the value at `path` in `data` against `descriptor`
    pub fn validate_field(
        &self,
        path: &FieldPath,
        descriptor: &Descriptor,
        data: &Value,
    ) -> ValidationResult {
        let label = path.to_string();
        let mut builder = ResultBuilder::new();

        let mut current = descriptor;
        let spec = loop {
            match current {
                Descriptor::Type(spec) => break spec,
                Descriptor::Rule(rule) => {
                    if self.warn_unresolved {
                        warn_unresolved_fields(&label, rule, data, &mut builder);
                    }
                    current = if evaluate_expression(&rule.condition, data) {
                        rule.then_branch.as_ref()
                    } else {
                        rule.else_branch.as_ref()
                    };
                }
            }
        };

        tracing::debug!("Validating field '{}' against {}", label, spec);

        let result = validate_at(&label, spec, resolve(path, data));
        if let Some(value) = &result.value {
            builder.value(value.clone());
        }
        builder.merge(result);
        builder.build()
    }
}

/// Only predicates whose operator takes an operand are reported; the
/// existence family reads unresolved fields as absent
fn warn_unresolved_fields(
    label: &str,
    rule: &ConditionalRule,
    data: &Value,
    builder: &mut ResultBuilder,
) {
    for predicate in rule.condition.predicates() {
        if predicate.operator.requires_operand && resolve(&predicate.field, data).is_none() {
            builder.warning(
                ValidationIssue::new(
                    label,
                    IssueCode::UnresolvedConditionField,
                    format!("condition field '{}' does not resolve", predicate.field),
                )
                .with_expected(predicate.field.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use typeline_parser::{parse_descriptor, parse_type};

    fn check_json(type_string: &str, value: serde_json::Value) -> ValidationResult {
        let spec = parse_type(type_string).unwrap();
        validate(&spec, Some(&Value::from(value)))
    }

    fn code(result: &ValidationResult) -> Option<IssueCode> {
        result.first_error().map(|issue| issue.code)
    }

    #[test]
    fn test_number_range() {
        let spec = TypeSpecifier::base(BaseKind::Number).with_range(Some(0.0), Some(100.0));

        let over = validate(&spec, Some(&Value::Number(150.0)));
        assert!(!over.is_valid());
        let issue = over.first_error().unwrap();
        assert_eq!(issue.code, IssueCode::AboveMaximum);
        assert_eq!(issue.message, "value 150 exceeds maximum 100");
        assert_eq!(issue.path, ROOT_PATH);

        let ok = validate(&spec, Some(&Value::Number(50.0)));
        assert!(ok.is_valid());
        assert_eq!(ok.value, Some(Value::Number(50.0)));

        let under = validate(&spec, Some(&Value::Number(-1.0)));
        assert_eq!(code(&under), Some(IssueCode::BelowMinimum));
    }

    #[test]
    fn test_optionality() {
        let required = parse_type("string").unwrap();
        assert_eq!(code(&validate(&required, None)), Some(IssueCode::Required));
        let null = validate(&required, Some(&Value::Null));
        assert_eq!(code(&null), Some(IssueCode::Required));
        assert_eq!(null.errors[0].actual.as_deref(), Some("null"));

        let optional = parse_type("string(5,)?").unwrap();
        assert!(validate(&optional, None).is_valid());
        assert!(validate(&optional, Some(&Value::Null)).is_valid());
        assert_eq!(
            code(&validate(&optional, Some(&Value::from("abc")))),
            Some(IssueCode::TooShort)
        );
    }

    #[test]
    fn test_kind_checks() {
        assert!(check_json("string", json!("x")).is_valid());
        assert_eq!(code(&check_json("string", json!(1))), Some(IssueCode::TypeMismatch));
        assert!(check_json("number", json!(1.5)).is_valid());
        assert_eq!(code(&check_json("number", json!("1"))), Some(IssueCode::TypeMismatch));
        assert!(check_json("boolean", json!(false)).is_valid());
        assert!(check_json("object", json!({"a": 1})).is_valid());
        assert!(check_json("record", json!({})).is_valid());
        assert_eq!(code(&check_json("object", json!([]))), Some(IssueCode::TypeMismatch));
        assert!(check_json("any", json!([1, "a"])).is_valid());
    }

    #[test]
    fn test_dates() {
        assert!(check_json("date", json!("2024-02-29")).is_valid());
        assert!(check_json("date", json!("2024-02-29T10:30:00Z")).is_valid());
        assert!(check_json("date", json!("2024-02-29T10:30:00+02:00")).is_valid());
        assert_eq!(code(&check_json("date", json!("2023-02-29"))), Some(IssueCode::InvalidDate));
        assert_eq!(code(&check_json("date", json!("yesterday"))), Some(IssueCode::InvalidDate));
        assert_eq!(code(&check_json("date", json!(20240229))), Some(IssueCode::TypeMismatch));
    }

    #[test]
    fn test_string_constraints() {
        assert!(check_json("string(2,5)", json!("abc")).is_valid());
        assert_eq!(code(&check_json("string(2,5)", json!("a"))), Some(IssueCode::TooShort));
        assert_eq!(code(&check_json("string(2,5)", json!("abcdef"))), Some(IssueCode::TooLong));
        assert!(check_json("string(3)", json!("äöü")).is_valid());

        assert!(check_json("string(/^[a-z]+$/)", json!("abc")).is_valid());
        let mismatch = check_json("string(/^[a-z]+$/)", json!("ABC"));
        assert_eq!(code(&mismatch), Some(IssueCode::PatternMismatch));
        assert!(check_json("string(/^[a-z]+$/i)", json!("ABC")).is_valid());
    }

    #[test]
    fn test_arrays() {
        assert!(check_json("string[]", json!([])).is_valid());
        assert!(check_json("string[]", json!(["a", "b"])).is_valid());
        assert_eq!(code(&check_json("string[]", json!("a"))), Some(IssueCode::TypeMismatch));

        let bad_item = check_json("number(0,10)[]", json!([1, 20, 3]));
        let issue = bad_item.first_error().unwrap();
        assert_eq!(issue.code, IssueCode::AboveMaximum);
        assert_eq!(issue.path, "$[1]");
        assert_eq!(issue.expected.as_deref(), Some("number(0,10)"));

        assert_eq!(
            code(&check_json("string[](1,2)", json!([]))),
            Some(IssueCode::TooFewItems)
        );
        assert_eq!(
            code(&check_json("string[](1,2)", json!(["a", "b", "c"]))),
            Some(IssueCode::TooManyItems)
        );
        assert_eq!(
            code(&check_json("string[]", json!(["a", null]))),
            Some(IssueCode::TypeMismatch)
        );
    }

    #[test]
    fn test_unions_and_constants() {
        assert!(check_json("admin|user", json!("user")).is_valid());
        assert_eq!(code(&check_json("admin|user", json!("root"))), Some(IssueCode::NotInUnion));
        assert!(check_json("1|2|3", json!(2)).is_valid());
        assert!(check_json("string(1,3)|number", json!(7)).is_valid());
        assert_eq!(
            code(&check_json("string(1,3)|number", json!("long"))),
            Some(IssueCode::NotInUnion)
        );

        assert!(check_json("=active", json!("active")).is_valid());
        assert!(check_json("=42", json!(42)).is_valid());
        assert_eq!(code(&check_json("=42", json!("42"))), Some(IssueCode::ConstantMismatch));
        assert_eq!(code(&check_json("=true", json!(1))), Some(IssueCode::ConstantMismatch));
    }

    #[test]
    fn test_field_validator_selects_branch() {
        let descriptor = parse_descriptor("when type=business *? string(2,) : string?").unwrap();
        let path = FieldPath::parse("company");
        let validator = FieldValidator::new();

        let business = Value::from(json!({"type": "business"}));
        let result = validator.validate_field(&path, &descriptor, &business);
        assert_eq!(code(&result), Some(IssueCode::Required));
        assert_eq!(result.errors[0].path, "company");

        let personal = Value::from(json!({"type": "personal"}));
        assert!(validator.validate_field(&path, &descriptor, &personal).is_valid());

        let named = Value::from(json!({"type": "business", "company": "Acme"}));
        let result = validator.validate_field(&path, &descriptor, &named);
        assert!(result.is_valid());
        assert_eq!(result.value, Some(Value::from("Acme")));
    }

    #[test]
    fn test_field_validator_warns_on_unresolved_condition_fields() {
        let descriptor = parse_descriptor("when tier=gold *? number : number?").unwrap();
        let path = FieldPath::parse("discount");
        let data = Value::from(json!({}));

        let result = FieldValidator::new().validate_field(&path, &descriptor, &data);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, IssueCode::UnresolvedConditionField);

        let quiet = FieldValidator::new()
            .with_warn_unresolved(false)
            .validate_field(&path, &descriptor, &data);
        assert!(quiet.warnings.is_empty());

        let existence = parse_descriptor("when email exists *? string : string?").unwrap();
        let result = FieldValidator::new().validate_field(&path, &existence, &data);
        assert!(result.warnings.is_empty());
    }
}
