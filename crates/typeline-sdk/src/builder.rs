//! Builder pattern for SchemaEngine

use crate::config::EngineConfig;
use crate::engine::SchemaEngine;
use crate::error::{Result, SdkError};
use crate::schema::{Schema, SchemaField, SchemaFormat};
use std::path::PathBuf;
use typeline_parser::ConditionalParser;

/// Builder for SchemaEngine
///
/// Schema files are loaded first, then inline documents, then single
/// fields. A later field with the same name replaces an earlier one.
///
/// # Example
///
/// ```rust,ignore
/// use typeline_sdk::{SchemaEngineBuilder, SchemaFormat};
///
/// let engine = SchemaEngineBuilder::new()
///     .add_schema_file("schemas/signup.yaml")
///     .add_field("referrer", "string?")
///     .fail_fast(true)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct SchemaEngineBuilder {
    config: EngineConfig,
    name: Option<String>,
    files: Vec<PathBuf>,
    documents: Vec<(String, SchemaFormat)>,
    fields: Vec<(String, String)>,
}

impl SchemaEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the schema
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a schema file, YAML unless it ends in `.json`
    pub fn add_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add a schema document
    pub fn add_schema_str(mut self, text: impl Into<String>, format: SchemaFormat) -> Self {
        self.documents.push((text.into(), format));
        self
    }

    /// Add a single field
    pub fn add_field(mut self, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        self.fields.push((name.into(), descriptor.into()));
        self
    }

    /// Replace the engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Accept or reject undeclared top-level fields
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.config.allow_unknown_fields = allow;
        self
    }

    /// Warn when a condition compares a field that does not resolve
    pub fn warn_unresolved_conditions(mut self, warn: bool) -> Self {
        self.config.warn_unresolved_conditions = warn;
        self
    }

    /// Stop at the first failing field
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.fail_fast = fail_fast;
        self
    }

    /// Set the conditional nesting bound
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Parse every source and build the engine
    pub fn build(self) -> Result<SchemaEngine> {
        if self.config.max_nesting_depth == 0 {
            return Err(SdkError::ConfigError(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        let parser = ConditionalParser::new().with_max_depth(self.config.max_nesting_depth);

        let mut schema = Schema::new();
        if let Some(name) = self.name {
            schema = schema.with_name(name);
        }

        for path in &self.files {
            tracing::debug!("Loading schema file: {}", path.display());
            schema.extend(Schema::from_file(path, &parser)?);
        }
        for (text, format) in &self.documents {
            schema.extend(Schema::parse_str(text, *format, &parser)?);
        }
        for (name, descriptor) in &self.fields {
            schema.insert(SchemaField::parse(name, descriptor, &parser)?);
        }

        if schema.is_empty() {
            tracing::warn!("Schema has no fields; every object payload is valid");
        }

        Ok(SchemaEngine::new(schema, self.config))
    }
}
