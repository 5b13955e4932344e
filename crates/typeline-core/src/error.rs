//! Error types for typeline core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid regular expression /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unsupported regular expression flag '{flag}'")]
    UnsupportedFlag { flag: char },
}

pub type Result<T> = std::result::Result<T, CoreError>;
