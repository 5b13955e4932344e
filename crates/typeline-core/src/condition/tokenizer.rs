//! Condition tokenizer
//!
//! Splits a bare condition (no surrounding `when`) into field, operator and
//! operand. There are no delimiters between the three, so the operator
//! registry is walked in precedence order and the first operator that leaves
//! a well-formed field path on its left wins:
//!
//! - operators without an operand match as a suffix (`email exists`,
//!   `email.exists`, `email!exists`)
//! - symbol operators match at their first top-level occurrence (`age>=18`)
//! - word operators match on a word boundary (`role in (admin,user)`,
//!   `name startsWith Dr`, `role!in(admin)`)
//!
//! Top-level `&&`/`||` split the condition into a flat chain first.

use super::types::{ConditionExpression, LogicalConnector};
use crate::operator::{by_precedence, OperatorDefinition};
use crate::path::FieldPath;
use crate::types::pattern::is_escaped;

/// Tokenize a condition string. Returns `None` when no operator produces a
/// valid field path, or when any side of a chain fails to tokenize.
pub fn tokenize(condition: &str) -> Option<ConditionExpression> {
    let condition = condition.trim();
    if condition.is_empty() {
        return None;
    }

    let (parts, connectors) = split_logical(condition);
    let mut parts = parts.into_iter();
    let mut head = tokenize_predicate(parts.next()?)?;
    for (connector, part) in connectors.into_iter().zip(parts) {
        head.chain.push((connector, tokenize_predicate(part)?));
    }
    Some(head)
}

/// Tokenize a single predicate, ignoring `&&`/`||`
pub fn tokenize_predicate(text: &str) -> Option<ConditionExpression> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for operator in by_precedence() {
        let split = if operator.requires_operand {
            split_infix(text, operator)
        } else {
            split_suffix(text, operator)
        };

        if let Some((field, raw_value)) = split {
            log::trace!("Tokenized '{}' with operator '{}'", text, operator.symbol);
            return Some(ConditionExpression::new(
                FieldPath::parse(field),
                operator,
                raw_value,
            ));
        }
    }

    log::debug!("No operator matched condition '{}'", text);
    None
}

/// Split on `&&` / `||` outside brackets and parentheses. Escaped brackets
/// and parentheses do not open or close a group.
fn split_logical(text: &str) -> (Vec<&str>, Vec<LogicalConnector>) {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut connectors = Vec::new();
    let mut start = 0;
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c.is_ascii() && is_escaped(text, i) => {}
            None => match c {
                b'[' | b'(' => depth += 1,
                b']' | b')' => depth -= 1,
                b'"' | b'\'' if depth > 0 => quote = Some(c),
                b'&' | b'|' if depth == 0 && bytes.get(i + 1) == Some(&c) => {
                    parts.push(&text[start..i]);
                    connectors.push(if c == b'&' {
                        LogicalConnector::And
                    } else {
                        LogicalConnector::Or
                    });
                    i += 2;
                    start = i;
                    continue;
                }
                _ => {}
            },
        }
        i += 1;
    }
    parts.push(&text[start..]);

    (parts, connectors)
}

fn split_suffix<'a>(text: &'a str, operator: &OperatorDefinition) -> Option<(&'a str, String)> {
    let rest = text.strip_suffix(operator.symbol)?;
    if !operator.is_negated() {
        let boundary = rest.chars().last()?;
        if boundary != '.' && !boundary.is_whitespace() {
            return None;
        }
    }

    let field = rest.trim_end();
    let field = field.strip_suffix('.').unwrap_or(field).trim();
    FieldPath::is_valid_syntax(field).then(|| (field, String::new()))
}

fn split_infix<'a>(text: &'a str, operator: &OperatorDefinition) -> Option<(&'a str, String)> {
    let word = operator.is_word();

    for pos in top_level_positions(text, operator.symbol) {
        if pos == 0 {
            continue;
        }
        let after = pos + operator.symbol.len();

        if word {
            let prev = text[..pos].chars().last();
            if !operator.is_negated() && !prev.is_some_and(char::is_whitespace) {
                continue;
            }
            let next = text[after..].chars().next();
            let boundary = next.map_or(true, |c| {
                c.is_whitespace() || matches!(c, '(' | '[' | '"' | '\'')
            });
            if !boundary {
                continue;
            }
        }

        let field = text[..pos].trim();
        if !FieldPath::is_valid_syntax(field) {
            return None;
        }
        return Some((field, text[after..].trim().to_string()));
    }

    None
}

/// Byte offsets of `symbol` outside bracket segments
fn top_level_positions(text: &str, symbol: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            '"' | '\'' if depth > 0 => quote = Some(c),
            _ if depth == 0 && text[i..].starts_with(symbol) => positions.push(i),
            _ => {}
        }
    }

    positions
}
