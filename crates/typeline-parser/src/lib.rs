//! Typeline Parser - grammar parser for the typeline schema language
//!
//! This crate turns schema strings into descriptors:
//! - `TypeParser` parses type strings (`string(2,50)?`, `admin|user`, `=0`)
//! - `ConditionalParser` parses conditional expressions in arrow,
//!   parenthesized and legacy form, falling back to `TypeParser`

pub mod conditional_parser;
pub mod error;
pub mod type_parser;

// Re-export main parser types
pub use conditional_parser::{ConditionalParser, DEFAULT_MAX_DEPTH};
pub use error::{GrammarError, Result};
pub use type_parser::TypeParser;

use typeline_core::{Descriptor, TypeSpecifier};

/// Parse a type string
pub fn parse_type(input: &str) -> Result<TypeSpecifier> {
    TypeParser::parse(input)
}

/// Parse a descriptor (plain type or conditional) with the default nesting bound
pub fn parse_descriptor(input: &str) -> Result<Descriptor> {
    ConditionalParser::new().parse(input)
}
