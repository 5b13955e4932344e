//! Operator registry for typeline conditions
//!
//! Every comparison, existence, string, membership and regex operator lives in
//! one static table. The table is declared in descending precedence order,
//! which is the order the condition tokenizer walks it in:
//!
//! - operators without an operand (`exists`, `empty`, `null` and their
//!   negations) rank above every operator that takes a value
//! - a negated form ranks immediately above its positive counterpart
//! - a symbol that another symbol is a prefix or suffix of ranks above it
//!   (`!=`/`>=`/`<=` before `=`, `!~` before `~`, `!in` before `in`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of data an operator can meaningfully be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
}

/// Operator identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    // Existence family (no operand)
    /// Field is neither missing nor null
    Exists,
    /// Field is missing or null
    NotExists,
    /// Empty string, array or object
    Empty,
    /// Negation of `Empty`
    NotEmpty,
    /// Field is exactly null
    Null,
    /// Negation of `Null`
    NotNull,

    // Comparison operators
    /// Equal (=), compared as strings
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,

    // String operators
    /// Regex match (~)
    Matches,
    /// Regex non-match (!~)
    NotMatches,
    /// Substring
    Contains,
    /// Negated substring
    NotContains,
    /// Prefix
    StartsWith,
    /// Suffix
    EndsWith,

    // Membership operators
    /// In comma separated list
    In,
    /// Not in comma separated list
    NotIn,
}

/// A single registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDefinition {
    /// Operator identity
    pub kind: OperatorKind,
    /// Surface symbol as written in conditions
    pub symbol: &'static str,
    /// Higher ranks are tried first by the tokenizer
    pub precedence: u16,
    /// Whether a value must follow the symbol
    pub requires_operand: bool,
    /// Kinds of data the operator applies to
    pub applicable_kinds: &'static [DataKind],
}

impl OperatorDefinition {
    /// Word operators (`contains`, `in`, ...) only match on word boundaries
    pub fn is_word(&self) -> bool {
        self.symbol
            .trim_start_matches('!')
            .chars()
            .all(|c| c.is_ascii_alphabetic())
    }

    /// Negated operators start with `!`
    pub fn is_negated(&self) -> bool {
        self.symbol.starts_with('!')
    }

    /// Whether this operator applies to the given data kind
    pub fn supports(&self, kind: DataKind) -> bool {
        self.applicable_kinds.contains(&kind)
    }
}

impl fmt::Display for OperatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

const ALL_KINDS: &[DataKind] = &[
    DataKind::String,
    DataKind::Number,
    DataKind::Boolean,
    DataKind::Array,
    DataKind::Object,
    DataKind::Date,
];
const CONTAINER_KINDS: &[DataKind] = &[DataKind::String, DataKind::Array, DataKind::Object];
const SCALAR_KINDS: &[DataKind] = &[
    DataKind::String,
    DataKind::Number,
    DataKind::Boolean,
    DataKind::Date,
];
const ORDERED_KINDS: &[DataKind] = &[DataKind::Number, DataKind::Date];
const TEXT_KINDS: &[DataKind] = &[DataKind::String];
const SEARCHABLE_KINDS: &[DataKind] = &[DataKind::String, DataKind::Array];
const MEMBER_KINDS: &[DataKind] = &[DataKind::String, DataKind::Number, DataKind::Boolean];

const fn op(
    kind: OperatorKind,
    symbol: &'static str,
    precedence: u16,
    requires_operand: bool,
    applicable_kinds: &'static [DataKind],
) -> OperatorDefinition {
    OperatorDefinition {
        kind,
        symbol,
        precedence,
        requires_operand,
        applicable_kinds,
    }
}

/// The registry, in descending precedence order
static OPERATORS: [OperatorDefinition; 20] = [
    op(OperatorKind::NotExists, "!exists", 200, false, ALL_KINDS),
    op(OperatorKind::Exists, "exists", 195, false, ALL_KINDS),
    op(OperatorKind::NotEmpty, "!empty", 190, false, CONTAINER_KINDS),
    op(OperatorKind::Empty, "empty", 185, false, CONTAINER_KINDS),
    op(OperatorKind::NotNull, "!null", 180, false, ALL_KINDS),
    op(OperatorKind::Null, "null", 175, false, ALL_KINDS),
    op(OperatorKind::Ne, "!=", 120, true, SCALAR_KINDS),
    op(OperatorKind::Ge, ">=", 115, true, ORDERED_KINDS),
    op(OperatorKind::Le, "<=", 110, true, ORDERED_KINDS),
    op(OperatorKind::NotMatches, "!~", 105, true, TEXT_KINDS),
    op(OperatorKind::Matches, "~", 100, true, TEXT_KINDS),
    op(OperatorKind::Eq, "=", 95, true, SCALAR_KINDS),
    op(OperatorKind::Gt, ">", 90, true, ORDERED_KINDS),
    op(OperatorKind::Lt, "<", 85, true, ORDERED_KINDS),
    op(OperatorKind::NotContains, "!contains", 60, true, SEARCHABLE_KINDS),
    op(OperatorKind::Contains, "contains", 55, true, SEARCHABLE_KINDS),
    op(OperatorKind::StartsWith, "startsWith", 50, true, TEXT_KINDS),
    op(OperatorKind::EndsWith, "endsWith", 45, true, TEXT_KINDS),
    op(OperatorKind::NotIn, "!in", 40, true, MEMBER_KINDS),
    op(OperatorKind::In, "in", 35, true, MEMBER_KINDS),
];

/// All operators, sorted by descending precedence
pub fn by_precedence() -> &'static [OperatorDefinition] {
    &OPERATORS
}

/// Whether `operator` applies to data of `kind`
pub fn supports(operator: OperatorKind, kind: DataKind) -> bool {
    definition(operator).is_some_and(|def| def.supports(kind))
}

/// Find an operator by its surface symbol
pub fn lookup(symbol: &str) -> Option<&'static OperatorDefinition> {
    OPERATORS.iter().find(|def| def.symbol == symbol)
}

/// Find the registry entry of an operator
pub fn definition(operator: OperatorKind) -> Option<&'static OperatorDefinition> {
    OPERATORS.iter().find(|def| def.kind == operator)
}

/// Data kinds supported by an operator
pub fn supported_kinds(operator: OperatorKind) -> &'static [DataKind] {
    definition(operator)
        .map(|def| def.applicable_kinds)
        .unwrap_or(&[])
}
