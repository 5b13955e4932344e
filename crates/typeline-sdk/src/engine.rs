//! SchemaEngine - validates payloads against a schema

use crate::builder::SchemaEngineBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::schema::Schema;
use typeline_core::Value;
use typeline_runtime::{
    FieldValidator, IssueCode, ResultBuilder, ValidationIssue, ValidationResult, ROOT_PATH,
};

/// Validates payloads against a loaded schema
#[derive(Debug, Clone)]
pub struct SchemaEngine {
    schema: Schema,
    config: EngineConfig,
    validator: FieldValidator,
}

impl SchemaEngine {
    /// Create an engine for a parsed schema
    pub fn new(schema: Schema, config: EngineConfig) -> Self {
        tracing::info!(
            "Schema '{}' loaded with {} field(s)",
            schema.name().unwrap_or("<unnamed>"),
            schema.len()
        );
        let validator =
            FieldValidator::new().with_warn_unresolved(config.warn_unresolved_conditions);
        Self {
            schema,
            config,
            validator,
        }
    }

    /// Start building an engine
    pub fn builder() -> SchemaEngineBuilder {
        SchemaEngineBuilder::new()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a JSON payload
    pub fn validate(&self, payload: &serde_json::Value) -> ValidationResult {
        self.validate_value(&Value::from(payload.clone()))
    }

    /// Parse and validate a JSON payload
    pub fn validate_json(&self, text: &str) -> Result<ValidationResult> {
        let payload: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.validate(&payload))
    }

    /// Validate a payload. Every field is validated against the whole
    /// payload and the per-field results are merged in schema order.
    pub fn validate_value(&self, data: &Value) -> ValidationResult {
        let Value::Object(map) = data else {
            return ValidationResult::failure(
                ValidationIssue::new(
                    ROOT_PATH,
                    IssueCode::TypeMismatch,
                    format!("expected object payload, got {}", data.type_name()),
                )
                .with_expected("object"),
            );
        };

        let mut builder = ResultBuilder::new();
        for field in self.schema.fields() {
            let result = self
                .validator
                .validate_field(&field.path, &field.descriptor, data);
            builder.merge(result);

            if self.config.fail_fast && builder.has_errors() {
                tracing::debug!("Stopping at field '{}' (fail_fast)", field.name);
                return builder.build();
            }
        }

        if !self.config.allow_unknown_fields {
            let declared = self.schema.root_keys();
            let mut unknown: Vec<&String> = map
                .keys()
                .filter(|key| !declared.contains(&key.as_str()))
                .collect();
            unknown.sort();
            for key in unknown {
                builder.error(ValidationIssue::new(
                    key.as_str(),
                    IssueCode::UnknownField,
                    format!("field '{}' is not declared in the schema", key),
                ));
            }
        }

        builder.value(data.clone());
        let result = builder.build();
        tracing::debug!(
            "Payload validated: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
        result
    }

    /// Validate a single declared field of a payload
    pub fn validate_field(&self, name: &str, payload: &serde_json::Value) -> Option<ValidationResult> {
        let field = self.schema.field(name)?;
        let data = Value::from(payload.clone());
        Some(
            self.validator
                .validate_field(&field.path, &field.descriptor, &data),
        )
    }
}
