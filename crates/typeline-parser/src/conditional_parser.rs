//! Conditional expression parser
//!
//! Parses field descriptors. Three equivalent conditional surfaces are
//! recognised and normalised to the same `ConditionalRule`:
//!
//! - Arrow: `when <cond> *? <then> : <else>`
//! - Parenthesized: `when(<cond>) then(<then>) else(<else>)`
//! - Legacy: `when:<cond>:<then>:<else>`
//!
//! Anything else is a plain type string and goes to [`TypeParser`].
//! Branches are parsed recursively, so a branch may itself be a conditional.

use crate::error::{GrammarError, Result};
use crate::type_parser::{group_close, TypeParser};
use typeline_core::condition::tokenize;
use typeline_core::types::pattern::{is_escaped, pattern_group_close};
use typeline_core::{ConditionExpression, ConditionalRule, Descriptor};

/// Default bound on conditional nesting
pub const DEFAULT_MAX_DEPTH: usize = 32;

const THEN_OPERATOR: &str = "*?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Arrow,
    Parenthesized,
    Legacy,
}

/// Descriptor parser
#[derive(Debug, Clone, Copy)]
pub struct ConditionalParser {
    max_depth: usize,
}

impl Default for ConditionalParser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConditionalParser {
    /// Create a parser with the default nesting bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum conditional nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Maximum conditional nesting depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a descriptor string
    pub fn parse(&self, input: &str) -> Result<Descriptor> {
        self.parse_at(input, 0, false)
    }

    fn parse_at(&self, input: &str, depth: usize, branch: bool) -> Result<Descriptor> {
        let input = input.trim();

        let Some(syntax) = detect_syntax(input) else {
            let spec = if branch {
                TypeParser::parse_branch(input)?
            } else {
                TypeParser::parse(input)?
            };
            return Ok(Descriptor::Type(spec));
        };

        if depth >= self.max_depth {
            return Err(GrammarError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }

        log::trace!("Parsing {:?} conditional at depth {}: {}", syntax, depth, input);

        let (condition, then_text, else_text) = match syntax {
            Syntax::Arrow => split_arrow(input)?,
            Syntax::Parenthesized => split_parenthesized(input)?,
            Syntax::Legacy => split_legacy(input)?,
        };

        let condition = parse_condition(input, condition)?;
        let then_branch = self.parse_at(then_text, depth + 1, true)?;
        let else_branch = self.parse_at(else_text, depth + 1, true)?;

        Ok(Descriptor::Rule(ConditionalRule::new(
            condition,
            then_branch,
            else_branch,
        )))
    }
}

fn detect_syntax(input: &str) -> Option<Syntax> {
    let rest = input.strip_prefix("when")?;
    match rest.chars().next()? {
        c if c.is_whitespace() => Some(Syntax::Arrow),
        '(' => Some(Syntax::Parenthesized),
        ':' => Some(Syntax::Legacy),
        _ => None,
    }
}

fn parse_condition(input: &str, condition: &str) -> Result<ConditionExpression> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(GrammarError::EmptyCondition {
            input: input.to_string(),
        });
    }
    tokenize(condition).ok_or_else(|| GrammarError::InvalidCondition {
        condition: condition.to_string(),
    })
}

/// `when <cond> *? <then> : <else>`
fn split_arrow(input: &str) -> Result<(&str, &str, &str)> {
    let body = &input["when".len()..];
    let arrow = body
        .find(THEN_OPERATOR)
        .ok_or_else(|| GrammarError::MissingThenOperator {
            input: input.to_string(),
        })?;

    let condition = &body[..arrow];
    if condition.trim().is_empty() {
        return Err(GrammarError::EmptyCondition {
            input: input.to_string(),
        });
    }

    let tail = &body[arrow + THEN_OPERATOR.len()..];
    let colon = else_separator(tail).ok_or_else(|| GrammarError::MissingElseSeparator {
        input: input.to_string(),
    })?;

    Ok((condition, &tail[..colon], &tail[colon + 1..]))
}

/// Byte offset of the `:` separating then from else.
///
/// Every nested `when` opens a conditional that is closed by the next `:`
/// seen while it is open; the first `:` with nothing open is the separator.
/// Text inside parentheses and brackets is skipped, as is the body of a
/// `(/regex/)` group.
fn else_separator(tail: &str) -> Option<usize> {
    let mut open_rules = 0usize;
    let mut group_depth = 0i32;
    let mut prev: Option<char> = None;
    let mut skip_to = 0;

    for (i, c) in tail.char_indices() {
        if i < skip_to {
            continue;
        }
        let escaped = is_escaped(tail, i);
        match c {
            _ if escaped => {}
            '(' => match pattern_group_close(tail, i) {
                Some(close) => skip_to = close + 1,
                None => group_depth += 1,
            },
            '[' => group_depth += 1,
            ')' | ']' => group_depth -= 1,
            ':' if group_depth == 0 => {
                if open_rules == 0 {
                    return Some(i);
                }
                open_rules -= 1;
            }
            'w' if group_depth == 0 && starts_nested_when(tail, i, prev) => open_rules += 1,
            _ => {}
        }
        prev = Some(c);
    }

    None
}

fn starts_nested_when(text: &str, at: usize, prev: Option<char>) -> bool {
    let word_start = prev.map_or(true, |p| p.is_whitespace() || p == ':');
    word_start
        && text[at..].starts_with("when")
        && text[at + "when".len()..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
}

/// `when(<cond>) then(<then>) else(<else>)`
fn split_parenthesized(input: &str) -> Result<(&str, &str, &str)> {
    let unclosed = || GrammarError::UnclosedBracket {
        input: input.to_string(),
    };

    let rest = &input["when".len()..];
    let (condition, rest) = balanced_group(rest).ok_or_else(unclosed)?;

    let rest = rest
        .trim_start()
        .strip_prefix("then")
        .ok_or_else(|| GrammarError::MissingThenOperator {
            input: input.to_string(),
        })?;
    let (then_text, rest) = balanced_group(rest.trim_start()).ok_or_else(unclosed)?;

    let rest = rest
        .trim_start()
        .strip_prefix("else")
        .ok_or_else(|| GrammarError::MissingElseSeparator {
            input: input.to_string(),
        })?;
    let (else_text, rest) = balanced_group(rest.trim_start()).ok_or_else(unclosed)?;

    let trailing = rest.trim();
    if !trailing.is_empty() {
        return Err(GrammarError::TrailingInput {
            input: input.to_string(),
            trailing: trailing.to_string(),
        });
    }

    Ok((condition, then_text, else_text))
}

/// Split `(inner)rest`, honouring nested parentheses and regex groups
fn balanced_group(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('(') {
        return None;
    }
    let close = group_close(text, 0)?;
    Some((&text[1..close], &text[close + 1..]))
}

/// `when:<cond>:<then>:<else>`, where `<else>` may be another legacy conditional
fn split_legacy(input: &str) -> Result<(&str, &str, &str)> {
    let rest = &input["when:".len()..];

    let first = top_level_colon(rest).ok_or_else(|| GrammarError::MissingThenOperator {
        input: input.to_string(),
    })?;
    let condition = &rest[..first];
    let rest = &rest[first + 1..];

    let second = top_level_colon(rest).ok_or_else(|| GrammarError::MissingElseSeparator {
        input: input.to_string(),
    })?;

    Ok((condition, &rest[..second], &rest[second + 1..]))
}

fn top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut skip_to = 0;
    for (i, c) in text.char_indices() {
        if i < skip_to || is_escaped(text, i) {
            continue;
        }
        match c {
            '(' => match pattern_group_close(text, i) {
                Some(close) => skip_to = close + 1,
                None => depth += 1,
            },
            '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
