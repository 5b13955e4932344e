//! Compiled regular expressions
//!
//! Patterns are compiled once, when a descriptor is parsed, and shared
//! read-only by every evaluation afterwards.

use crate::error::{CoreError, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Flags accepted after a `/pattern/` literal. `g`, `u` and `y` are accepted
/// and have no effect on matching.
pub const PATTERN_FLAGS: &str = "gimsuyx";

/// A regular expression together with the source text it was compiled from
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile `source` with the given flag letters
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'g' | 'u' | 'y' => {}
                other => return Err(CoreError::UnsupportedFlag { flag: other }),
            }
        }

        let regex = builder.build().map_err(|e| CoreError::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    /// Compile a condition operand: `/pattern/flags` or a bare pattern
    pub fn from_literal(literal: &str) -> Result<Self> {
        match split_delimited(literal) {
            Some((source, flags)) => Self::new(source, flags),
            None => Self::new(literal, ""),
        }
    }

    /// Pattern source, without delimiters
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Flag letters
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Test the pattern against `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Split `/source/flags` at the last unescaped slash.
///
/// Returns `None` when the text does not start with `/`, has no closing
/// slash, or carries flag letters outside [`PATTERN_FLAGS`].
pub fn split_delimited(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix('/')?;
    let close = last_unescaped_slash(body)?;
    let flags = &body[close + 1..];
    if !flags.chars().all(|c| PATTERN_FLAGS.contains(c)) {
        return None;
    }
    Some((&body[..close], flags))
}

/// Closing parenthesis of a `(/source/flags)` group opened at byte offset `open`.
///
/// Slashes and parentheses inside a character class or behind a backslash
/// belong to the pattern. The group closes at the first `)` that follows an
/// unescaped slash with nothing but flag letters in between. Returns `None`
/// when the group does not start with `/` or never closes that way.
pub fn pattern_group_close(text: &str, open: usize) -> Option<usize> {
    let start = open + 1;
    if !text.get(start..)?.starts_with('/') {
        return None;
    }

    let mut in_class = false;
    let mut last_slash: Option<usize> = None;
    for (i, c) in text[start + 1..].char_indices() {
        let at = start + 1 + i;
        if is_escaped(text, at) {
            continue;
        }
        match c {
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '/' if !in_class => last_slash = Some(at),
            ')' if !in_class => {
                let is_close = last_slash.is_some_and(|slash| {
                    text[slash + 1..at].chars().all(|f| PATTERN_FLAGS.contains(f))
                });
                if is_close {
                    return Some(at);
                }
            }
            _ => {}
        }
    }
    None
}

fn last_unescaped_slash(text: &str) -> Option<usize> {
    text.char_indices()
        .filter(|&(i, c)| c == '/' && !is_escaped(text, i))
        .map(|(i, _)| i)
        .last()
}

/// Whether the character at byte offset `at` is preceded by an odd number of backslashes
pub fn is_escaped(text: &str, at: usize) -> bool {
    text[..at].chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}
