//! Validation issues

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine readable issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Required value is missing or null
    Required,
    /// Value has the wrong kind
    TypeMismatch,
    /// Number below the lower bound
    BelowMinimum,
    /// Number above the upper bound
    AboveMaximum,
    /// String shorter than the lower bound
    TooShort,
    /// String longer than the upper bound
    TooLong,
    /// String does not match the regex constraint
    PatternMismatch,
    /// Array with fewer items than allowed
    TooFewItems,
    /// Array with more items than allowed
    TooManyItems,
    /// Value matches no union member
    NotInUnion,
    /// Value differs from the constant
    ConstantMismatch,
    /// String that is not a valid date
    InvalidDate,
    /// Payload field not declared by the schema
    UnknownField,
    /// Condition reads a field that does not resolve
    UnresolvedConditionField,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::Required => "required",
            IssueCode::TypeMismatch => "type_mismatch",
            IssueCode::BelowMinimum => "below_minimum",
            IssueCode::AboveMaximum => "above_maximum",
            IssueCode::TooShort => "too_short",
            IssueCode::TooLong => "too_long",
            IssueCode::PatternMismatch => "pattern_mismatch",
            IssueCode::TooFewItems => "too_few_items",
            IssueCode::TooManyItems => "too_many_items",
            IssueCode::NotInUnion => "not_in_union",
            IssueCode::ConstantMismatch => "constant_mismatch",
            IssueCode::InvalidDate => "invalid_date",
            IssueCode::UnknownField => "unknown_field",
            IssueCode::UnresolvedConditionField => "unresolved_condition_field",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single error or warning, located by field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field path the issue refers to (`$` for the payload itself)
    pub path: String,

    /// Issue category
    pub code: IssueCode,

    /// Human readable description
    pub message: String,

    /// Expected type or constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Offending value, rendered as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationIssue {
    /// Create an issue
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Set the expected type or constraint
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Set the offending value
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.code)
    }
}
