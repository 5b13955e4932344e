//! Typeline SDK
//!
//! High-level API for loading schemas and validating payloads.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod schema;

// Re-export main types
pub use builder::SchemaEngineBuilder;
pub use config::EngineConfig;
pub use engine::SchemaEngine;
pub use error::{Result, SdkError};
pub use schema::{FieldDiagnostic, FieldProblem, Schema, SchemaField, SchemaFormat};

// Re-export commonly used types from dependencies
pub use typeline_core::{Descriptor, TypeSpecifier, Value};
pub use typeline_parser::{ConditionalParser, GrammarError};
pub use typeline_runtime::{IssueCode, ValidationIssue, ValidationResult};
