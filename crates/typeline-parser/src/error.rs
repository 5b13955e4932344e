//! Grammar error types

use thiserror::Error;

/// Error raised while parsing a type string or a conditional expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// Nothing to parse
    #[error("Empty type string")]
    EmptyType,

    /// Base type name is not recognised
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    /// Constraint inside `(...)` could not be read
    #[error("Malformed constraint in '{input}': {reason}")]
    MalformedConstraint { input: String, reason: String },

    /// Opening bracket or parenthesis without its closing counterpart
    #[error("Unclosed bracket in '{input}'")]
    UnclosedBracket { input: String },

    /// Regex constraint rejected by the regex engine
    #[error("Invalid regex /{pattern}/: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Union with a blank member (`a||b`, `a|`)
    #[error("Empty union member in '{input}'")]
    EmptyUnionMember { input: String },

    /// Conditional without `*?` (or without `then(...)`)
    #[error("Missing then-operator in '{input}'")]
    MissingThenOperator { input: String },

    /// Conditional without a top-level `:` (or without `else(...)`)
    #[error("Missing else-separator in '{input}'")]
    MissingElseSeparator { input: String },

    /// Conditional with nothing between `when` and `*?`
    #[error("Empty condition in '{input}'")]
    EmptyCondition { input: String },

    /// Condition that no operator could tokenize
    #[error("Invalid condition: {condition}")]
    InvalidCondition { condition: String },

    /// Trailing text after a parenthesized conditional
    #[error("Unexpected trailing input '{trailing}' in '{input}'")]
    TrailingInput { input: String, trailing: String },

    /// Conditionals nested deeper than the parser allows
    #[error("Conditional nesting exceeds maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, GrammarError>;
