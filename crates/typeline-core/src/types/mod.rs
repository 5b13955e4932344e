//! Type system for typeline
//!
//! This module contains the runtime type system including:
//! - Payload values
//! - Type specifiers parsed from type strings
//! - Compiled regular expression constraints

pub mod pattern;
pub mod specifier;
pub mod value;

pub use pattern::CompiledPattern;
pub use specifier::{
    BaseKind, Bounds, Constraint, Literal, SpecifierForm, TypeSpecifier, UnionMember,
};
pub use value::Value;
