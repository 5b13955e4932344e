//! SDK error types

use thiserror::Error;
use typeline_parser::GrammarError;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Grammar error outside of a schema field
    #[error("Grammar error: {0}")]
    GrammarError(#[from] GrammarError),

    /// Grammar error in a schema field
    #[error("Field '{field}': {source}")]
    FieldGrammar {
        field: String,
        #[source]
        source: GrammarError,
    },

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Schema document with the wrong shape
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
