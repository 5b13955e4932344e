//! Validation result and builder

use super::issue::ValidationIssue;
use serde::{Deserialize, Serialize};
use typeline_core::Value;

/// Outcome of validating a value or a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when there are no errors
    pub valid: bool,

    /// Failures
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,

    /// Non-fatal findings
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,

    /// The validated value, present on success when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationResult {
    /// Successful result
    pub fn success(value: Option<Value>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            value,
        }
    }

    /// Failed result with a single error
    pub fn failure(error: ValidationIssue) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            value: None,
        }
    }

    /// Whether validation passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// First error, if any
    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.errors.first()
    }

    /// Fold another result's issues into this one. The resolved value is kept.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
        if !self.valid {
            self.value = None;
        }
    }
}

/// Collects errors and warnings into a `ValidationResult`
#[derive(Debug, Default)]
pub struct ResultBuilder {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    value: Option<Value>,
}

impl ResultBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn error(&mut self, issue: ValidationIssue) -> &mut Self {
        self.errors.push(issue);
        self
    }

    /// Record a warning
    pub fn warning(&mut self, issue: ValidationIssue) -> &mut Self {
        self.warnings.push(issue);
        self
    }

    /// Set the resolved value reported on success
    pub fn value(&mut self, value: Value) -> &mut Self {
        self.value = Some(value);
        self
    }

    /// Fold a finished result in
    pub fn merge(&mut self, result: ValidationResult) -> &mut Self {
        self.errors.extend(result.errors);
        self.warnings.extend(result.warnings);
        self
    }

    /// Whether an error has been recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish the result
    pub fn build(self) -> ValidationResult {
        let valid = self.errors.is_empty();
        ValidationResult {
            valid,
            errors: self.errors,
            warnings: self.warnings,
            value: if valid { self.value } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::IssueCode;

    #[test]
    fn test_builder_valid_without_errors() {
        let mut builder = ResultBuilder::new();
        builder
            .warning(ValidationIssue::new("a", IssueCode::UnresolvedConditionField, "w"))
            .value(Value::Bool(true));
        let result = builder.build();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_builder_drops_value_on_error() {
        let mut builder = ResultBuilder::new();
        builder
            .value(Value::Bool(true))
            .error(ValidationIssue::new("a", IssueCode::Required, "missing"));
        let result = builder.build();
        assert!(!result.is_valid());
        assert_eq!(result.value, None);
        assert_eq!(result.first_error().map(|e| e.code), Some(IssueCode::Required));
    }

    #[test]
    fn test_merge() {
        let mut result = ValidationResult::success(Some(Value::Number(1.0)));
        result.merge(ValidationResult::success(None));
        assert!(result.is_valid());
        assert_eq!(result.value, Some(Value::Number(1.0)));

        result.merge(ValidationResult::failure(ValidationIssue::new(
            "b",
            IssueCode::TypeMismatch,
            "expected number",
        )));
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_serialises_codes_in_snake_case() {
        let issue = ValidationIssue::new("age", IssueCode::AboveMaximum, "too big")
            .with_expected("number(0,100)");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["code"], "above_maximum");
        assert_eq!(json["expected"], "number(0,100)");
        assert!(json.get("actual").is_none());
    }
}
