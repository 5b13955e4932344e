//! Validation result types

mod issue;
mod result;

pub use issue::{IssueCode, ValidationIssue};
pub use result::{ResultBuilder, ValidationResult};
