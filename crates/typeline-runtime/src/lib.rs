//! Typeline Runtime - evaluation and validation
//!
//! This crate applies parsed descriptors to payloads:
//! - Field path resolution
//! - Condition evaluation and branch selection
//! - Type validation with structured issues

pub mod context;
pub mod engine;
pub mod result;
pub mod validation;

// Re-export commonly used types
pub use context::{resolve, resolve_str};
pub use engine::{evaluate_condition, evaluate_expression, evaluate_rule, select_branch};
pub use result::{IssueCode, ResultBuilder, ValidationIssue, ValidationResult};
pub use validation::{validate, validate_at, FieldValidator, ROOT_PATH};
