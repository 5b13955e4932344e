//! Condition tokenizing
//!
//! Conditions guard conditional rules: `age>=18`, `email exists`,
//! `role in (admin,user)`, `code~^[A-Z]+$`, chained with `&&` / `||`.
//!
//! # Operators
//!
//! Existence checks take no operand and are written as a suffix:
//! - `exists` / `!exists`
//! - `empty` / `!empty`
//! - `null` / `!null`
//!
//! Everything else takes the rest of the text as operand:
//! - `=`, `!=`, `>`, `>=`, `<`, `<=`
//! - `~`, `!~` (regular expression, bare or `/pattern/flags`)
//! - `contains`, `!contains`, `startsWith`, `endsWith`
//! - `in`, `!in` (list in `()` or `[]`)

mod tokenizer;
mod types;

pub use tokenizer::{tokenize, tokenize_predicate};
pub use types::{ConditionExpression, LogicalConnector};
