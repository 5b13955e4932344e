//! Condition types produced by the tokenizer

use crate::operator::{OperatorDefinition, OperatorKind};
use crate::path::FieldPath;
use crate::types::CompiledPattern;
use std::fmt;

/// Connector between chained predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalConnector {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl LogicalConnector {
    /// Surface symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalConnector::And => "&&",
            LogicalConnector::Or => "||",
        }
    }

    /// Fold two already evaluated sides
    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            LogicalConnector::And => left && right,
            LogicalConnector::Or => left || right,
        }
    }
}

/// A tokenized condition: `field`, operator and raw operand, optionally
/// followed by a flat `&&`/`||` chain of further predicates
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpression {
    /// Field the predicate reads
    pub field: FieldPath,
    /// Registry entry of the operator
    pub operator: &'static OperatorDefinition,
    /// Operand text, empty for operators that take none
    pub raw_value: String,
    /// Pattern compiled from the operand of `~`/`!~`. `None` when the
    /// operand is not a valid regular expression.
    pub pattern: Option<CompiledPattern>,
    /// Further predicates, folded left to right
    pub chain: Vec<(LogicalConnector, ConditionExpression)>,
}

impl ConditionExpression {
    /// Create a single predicate, compiling regex operands up front
    pub fn new(
        field: FieldPath,
        operator: &'static OperatorDefinition,
        raw_value: impl Into<String>,
    ) -> Self {
        let raw_value = raw_value.into();
        let pattern = match operator.kind {
            OperatorKind::Matches | OperatorKind::NotMatches => {
                match CompiledPattern::from_literal(&raw_value) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        log::warn!("Condition operand on '{}' is not a usable regex: {}", field, e);
                        None
                    }
                }
            }
            _ => None,
        };

        Self {
            field,
            operator,
            raw_value,
            pattern,
            chain: Vec::new(),
        }
    }

    /// Append a chained predicate
    pub fn chain_with(mut self, connector: LogicalConnector, next: ConditionExpression) -> Self {
        self.chain.push((connector, next));
        self
    }

    /// This predicate followed by every chained one
    pub fn predicates(&self) -> impl Iterator<Item = &ConditionExpression> {
        std::iter::once(self).chain(self.chain.iter().map(|(_, expr)| expr))
    }

    /// Whether the condition is a chain of several predicates
    pub fn is_chain(&self) -> bool {
        !self.chain.is_empty()
    }

    fn fmt_predicate(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operator;
        if !op.requires_operand {
            if op.is_negated() {
                write!(f, "{}{}", self.field, op.symbol)
            } else {
                write!(f, "{} {}", self.field, op.symbol)
            }
        } else if op.is_word() {
            write!(f, "{} {} {}", self.field, op.symbol, self.raw_value)
        } else {
            write!(f, "{}{}{}", self.field, op.symbol, self.raw_value)
        }
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_predicate(f)?;
        for (connector, next) in &self.chain {
            write!(f, " {} ", connector.symbol())?;
            next.fmt_predicate(f)?;
        }
        Ok(())
    }
}
