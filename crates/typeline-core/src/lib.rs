//! Typeline Core - core types for the typeline schema language
//!
//! This crate provides the types shared by the parser and the runtime:
//! - Value types for payload data
//! - Type specifiers and compiled patterns
//! - Field paths
//! - The operator registry and the condition tokenizer
//! - Field descriptors (plain types and conditional rules)
//! - Error types

pub mod condition;
pub mod descriptor;
pub mod error;
pub mod operator;
pub mod path;
pub mod types;

// Re-export commonly used types
pub use condition::{tokenize, ConditionExpression, LogicalConnector};
pub use descriptor::{ConditionalRule, Descriptor};
pub use error::CoreError;
pub use operator::{DataKind, OperatorDefinition, OperatorKind};
pub use path::{FieldPath, PathSegment};
pub use types::{
    BaseKind, Bounds, CompiledPattern, Constraint, Literal, SpecifierForm, TypeSpecifier,
    UnionMember, Value,
};
