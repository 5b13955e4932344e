//! Type string parser
//!
//! Parses type strings into `TypeSpecifier`s.
//!
//! Supported syntax, tried in this order:
//! - Constants: `=active`, `=42`, `=true?`
//! - Unions: `admin|user|guest`, `string|number`, `a\|b|c?`
//! - Base kinds: `string`, `number(0,100)`, `string(/^[a-z]+$/i)`,
//!   `string[]`, `number[](1,5)`, `date?`

use crate::error::{GrammarError, Result};
use typeline_core::types::pattern::{is_escaped, pattern_group_close, split_delimited};
use typeline_core::types::specifier::is_numeric_literal;
use typeline_core::{
    BaseKind, Bounds, CompiledPattern, CoreError, Literal, TypeSpecifier, UnionMember,
};

/// Type string parser
pub struct TypeParser;

impl TypeParser {
    /// Parse a type string
    pub fn parse(input: &str) -> Result<TypeSpecifier> {
        let input = input.trim();

        if input.is_empty() || input == "?" {
            return Err(GrammarError::EmptyType);
        }

        if let Some(literal) = input.strip_prefix('=') {
            return Ok(Self::parse_constant(literal));
        }

        if split_union(input).len() > 1 {
            return Self::parse_union(input);
        }

        Self::parse_single(input)
    }

    /// Parse the branch of a conditional. A bare identifier that is not a
    /// base kind names the branch itself and becomes a single literal.
    pub fn parse_branch(input: &str) -> Result<TypeSpecifier> {
        let input = input.trim();
        let (body, optional) = strip_optional(input);

        if is_bare_identifier(body) && BaseKind::from_name(body).is_none() {
            return Ok(
                TypeSpecifier::union(vec![UnionMember::Literal(body.to_string())])
                    .with_optional(optional),
            );
        }

        Self::parse(input)
    }

    /// `=<literal>[?]`
    fn parse_constant(literal: &str) -> TypeSpecifier {
        let (literal, optional) = strip_optional(literal.trim());
        TypeSpecifier::constant(Literal::coerce(literal.trim())).with_optional(optional)
    }

    /// `<m1>|<m2>|...[?]`
    fn parse_union(input: &str) -> Result<TypeSpecifier> {
        let (body, optional) = strip_optional(input);
        let mut members = Vec::new();

        for part in split_union(body) {
            let part = part.trim();
            if part.is_empty() {
                return Err(GrammarError::EmptyUnionMember {
                    input: input.to_string(),
                });
            }

            if names_base_kind(part) {
                members.push(UnionMember::Type(Self::parse_single(part)?));
            } else {
                members.push(UnionMember::Literal(part.replace("\\|", "|")));
            }
        }

        Ok(TypeSpecifier::union(members).with_optional(optional))
    }

    /// `<base>[(<constraint>)][[]][(<count>)][?]`
    fn parse_single(input: &str) -> Result<TypeSpecifier> {
        let (body, optional) = strip_optional(input);
        let unclosed = || GrammarError::UnclosedBracket {
            input: input.to_string(),
        };

        let name_end = body.find(&['(', '['][..]).unwrap_or(body.len());
        let name = body[..name_end].trim();
        let kind = BaseKind::from_name(name).ok_or_else(|| GrammarError::UnknownType {
            name: name.to_string(),
        })?;

        let mut rest = &body[name_end..];
        let mut constraint = None;
        if rest.starts_with('(') {
            let close = group_close(rest, 0).ok_or_else(unclosed)?;
            constraint = Some(&rest[1..close]);
            rest = rest[close + 1..].trim_start();
        }

        let mut array = None;
        if let Some(after) = rest.strip_prefix("[]") {
            rest = after.trim_start();
            let mut bounds = Bounds::default();
            if rest.starts_with('(') {
                let close = group_close(rest, 0).ok_or_else(unclosed)?;
                bounds = parse_bounds(input, &rest[1..close])?.unwrap_or_default();
                rest = rest[close + 1..].trim_start();
            }
            array = Some(bounds);
        }

        if rest.starts_with(&['[', '('][..]) {
            return Err(unclosed());
        }
        if !rest.is_empty() {
            return Err(GrammarError::TrailingInput {
                input: input.to_string(),
                trailing: rest.to_string(),
            });
        }

        let mut spec = TypeSpecifier::base(kind).with_optional(optional);
        if let Some(raw) = constraint {
            spec = Self::apply_constraint(input, spec, kind, raw)?;
        }
        if let Some(bounds) = array {
            spec = spec.with_array(bounds);
        }

        Ok(spec)
    }

    fn apply_constraint(
        input: &str,
        spec: TypeSpecifier,
        kind: BaseKind,
        raw: &str,
    ) -> Result<TypeSpecifier> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(spec);
        }

        if kind == BaseKind::String && raw.starts_with('/') {
            let (source, flags) =
                split_delimited(raw).ok_or_else(|| GrammarError::MalformedConstraint {
                    input: input.to_string(),
                    reason: "regex needs a closing '/' followed only by flags from 'gimsuyx'"
                        .to_string(),
                })?;
            let pattern = CompiledPattern::new(source, flags).map_err(|e| match e {
                CoreError::InvalidPattern { pattern, message } => {
                    GrammarError::InvalidRegex { pattern, message }
                }
                other => GrammarError::MalformedConstraint {
                    input: input.to_string(),
                    reason: other.to_string(),
                },
            })?;
            return Ok(spec.with_pattern(pattern));
        }

        if !kind.accepts_range() {
            return Err(GrammarError::MalformedConstraint {
                input: input.to_string(),
                reason: format!("'{}' does not take a constraint", kind),
            });
        }

        match parse_bounds(input, raw)? {
            Some(bounds) => Ok(spec.with_range(bounds.min, bounds.max)),
            None => Ok(spec),
        }
    }
}

/// `min,max`, either side may be empty; a single value means exactly that value
fn parse_bounds(input: &str, raw: &str) -> Result<Option<Bounds>> {
    let raw = raw.trim();
    let (min, max) = raw.split_once(',').unwrap_or((raw, raw));

    let malformed = |reason: String| GrammarError::MalformedConstraint {
        input: input.to_string(),
        reason,
    };

    if max.contains(',') {
        return Err(malformed(format!("expected 'min,max', got '{}'", raw)));
    }

    let side = |text: &str| -> Result<Option<f64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if !is_numeric_literal(text) {
            return Err(malformed(format!("bound '{}' is not a number", text)));
        }
        text.parse::<f64>()
            .map(Some)
            .map_err(|e| malformed(format!("bound '{}': {}", text, e)))
    };

    let min = side(min)?;
    let max = side(max)?;

    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(malformed(format!("minimum {} exceeds maximum {}", lo, hi)));
        }
    }

    if min.is_none() && max.is_none() {
        return Ok(None);
    }
    Ok(Some(Bounds::new(min, max)))
}

/// Split on `|` outside parentheses and brackets, skipping `\|` and the
/// bodies of `(/regex/)` groups
pub(crate) fn split_union(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut skip_to = 0;

    for (i, c) in input.char_indices() {
        if i < skip_to || is_escaped(input, i) {
            continue;
        }
        match c {
            '(' => match pattern_group_close(input, i) {
                Some(close) => skip_to = close + 1,
                None => depth += 1,
            },
            '[' => depth += 1,
            ')' | ']' => depth -= 1,
            '|' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
}

/// Byte offset of the `)` closing the group opened at `open`. A
/// `(/regex/flags)` group closes after its pattern; any other group closes
/// at its balanced parenthesis.
pub(crate) fn group_close(text: &str, open: usize) -> Option<usize> {
    if let Some(close) = pattern_group_close(text, open) {
        return Some(close);
    }

    let mut at = open + 1;
    while let Some(c) = text.get(at..)?.chars().next() {
        if !is_escaped(text, at) {
            match c {
                '(' => {
                    at = group_close(text, at)? + 1;
                    continue;
                }
                ')' => return Some(at),
                _ => {}
            }
        }
        at += c.len_utf8();
    }
    None
}

fn strip_optional(input: &str) -> (&str, bool) {
    match input.strip_suffix('?') {
        Some(body) => (body.trim_end(), true),
        None => (input, false),
    }
}

/// Whether a union member is a base kind, optionally followed by its
/// constraint, array suffix or `?`. `string-editor` and `date range` are
/// literals.
fn names_base_kind(member: &str) -> bool {
    let end = member
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(member.len(), |(i, _)| i);
    if BaseKind::from_name(&member[..end]).is_none() {
        return false;
    }
    let rest = member[end..].trim_start();
    rest.is_empty() || rest.starts_with(&['(', '[', '?'][..])
}

fn is_bare_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeline_core::types::SpecifierForm;

    #[test]
    fn test_parse_base_kinds() {
        for kind in BaseKind::ALL {
            let spec = TypeParser::parse(kind.name()).unwrap();
            assert_eq!(spec.base_kind(), Some(kind));
            assert!(!spec.optional);
        }
    }

    #[test]
    fn test_parse_optional() {
        let spec = TypeParser::parse("date?").unwrap();
        assert_eq!(spec.base_kind(), Some(BaseKind::Date));
        assert!(spec.optional);
    }

    #[test]
    fn test_parse_range_constraint() {
        let spec = TypeParser::parse("number(0,100)").unwrap();
        assert_eq!(spec.constraint_min(), Some(0.0));
        assert_eq!(spec.constraint_max(), Some(100.0));

        let open = TypeParser::parse("string(,50)?").unwrap();
        assert_eq!(open.constraint_min(), None);
        assert_eq!(open.constraint_max(), Some(50.0));
        assert!(open.optional);

        let exact = TypeParser::parse("string(5)").unwrap();
        assert_eq!(exact.constraint_min(), Some(5.0));
        assert_eq!(exact.constraint_max(), Some(5.0));

        let negative = TypeParser::parse("number(-10.5,)").unwrap();
        assert_eq!(negative.constraint_min(), Some(-10.5));
    }

    #[test]
    fn test_parse_regex_constraint() {
        let spec = TypeParser::parse("string(/^[a-z]+$/i)").unwrap();
        let pattern = spec.constraint_regex().unwrap();
        assert_eq!(pattern.source(), "^[a-z]+$");
        assert_eq!(pattern.flags(), "i");
        assert!(pattern.is_match("ABC"));

        let with_parens = TypeParser::parse(r"string(/^\(\d+\)$/)").unwrap();
        assert!(with_parens.constraint_regex().unwrap().is_match("(42)"));
    }

    #[test]
    fn test_regex_with_closing_paren_in_class() {
        let spec = TypeParser::parse("string(/^[^)]+$/)").unwrap();
        let pattern = spec.constraint_regex().unwrap();
        assert_eq!(pattern.source(), "^[^)]+$");
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("a)c"));

        let bracketed = TypeParser::parse("string(/[)]/)").unwrap();
        assert!(bracketed.constraint_regex().unwrap().is_match(")"));

        let opening = TypeParser::parse("string(/[(]/)").unwrap();
        assert!(opening.constraint_regex().unwrap().is_match("("));

        let union = TypeParser::parse("string(/[)]/)|none").unwrap();
        assert_eq!(union.union_members().len(), 2);
        assert_eq!(union.union_members()[1], UnionMember::Literal("none".to_string()));

        let listed = TypeParser::parse("string(/^[^)]+$/)[](1,3)").unwrap();
        assert_eq!(listed.array, Some(Bounds::new(Some(1.0), Some(3.0))));
    }

    #[test]
    fn test_parse_arrays() {
        let spec = TypeParser::parse("string[]").unwrap();
        assert!(spec.is_array());
        assert!(spec.array.unwrap().is_open());

        let counted = TypeParser::parse("number(0,10)[](1,3)?").unwrap();
        assert_eq!(counted.array, Some(Bounds::new(Some(1.0), Some(3.0))));
        assert_eq!(counted.constraint_max(), Some(10.0));
        assert!(counted.optional);
    }

    #[test]
    fn test_parse_constants() {
        assert_eq!(
            TypeParser::parse("=true").unwrap().constant_value(),
            Some(&Literal::Bool(true))
        );
        assert_eq!(
            TypeParser::parse("=42").unwrap().constant_value(),
            Some(&Literal::Number(42.0))
        );
        let spec = TypeParser::parse("=active?").unwrap();
        assert_eq!(
            spec.constant_value(),
            Some(&Literal::String("active".to_string()))
        );
        assert!(spec.optional);
    }

    #[test]
    fn test_parse_unions() {
        let spec = TypeParser::parse("admin|user|guest").unwrap();
        assert_eq!(
            spec.union_members(),
            &[
                UnionMember::Literal("admin".to_string()),
                UnionMember::Literal("user".to_string()),
                UnionMember::Literal("guest".to_string()),
            ]
        );

        let typed = TypeParser::parse("string(1,5)|number?").unwrap();
        assert!(typed.optional);
        match &typed.union_members()[0] {
            UnionMember::Type(member) => assert_eq!(member.constraint_max(), Some(5.0)),
            other => panic!("expected type member, got {:?}", other),
        }

        let escaped = TypeParser::parse(r"a\|b|c").unwrap();
        assert_eq!(escaped.union_members()[0], UnionMember::Literal("a|b".to_string()));
        assert_eq!(escaped.to_string(), r"a\|b|c");

        let regex_member = TypeParser::parse("string(/a|b/)|none").unwrap();
        assert_eq!(regex_member.union_members().len(), 2);
    }

    #[test]
    fn test_union_literals_that_start_with_a_kind_name() {
        for (input, first) in [
            ("admin|string-editor", "string-editor"),
            ("date-range|epoch", "date-range"),
            ("any thing|x", "any thing"),
            ("viewer|number_one", "number_one"),
        ] {
            let spec = TypeParser::parse(input).unwrap();
            assert!(
                spec.union_members()
                    .contains(&UnionMember::Literal(first.to_string())),
                "{} should keep '{}' as a literal",
                input,
                first
            );
        }

        let typed = TypeParser::parse("string (1,5)|none").unwrap();
        assert!(matches!(typed.union_members()[0], UnionMember::Type(_)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(TypeParser::parse(""), Err(GrammarError::EmptyType));
        assert_eq!(
            TypeParser::parse("strng"),
            Err(GrammarError::UnknownType { name: "strng".to_string() })
        );
        assert!(matches!(
            TypeParser::parse("number(a,5)"),
            Err(GrammarError::MalformedConstraint { .. })
        ));
        assert!(matches!(
            TypeParser::parse("number(10,1)"),
            Err(GrammarError::MalformedConstraint { .. })
        ));
        assert!(matches!(
            TypeParser::parse("boolean(1,2)"),
            Err(GrammarError::MalformedConstraint { .. })
        ));
        assert!(matches!(
            TypeParser::parse("string(1,5"),
            Err(GrammarError::UnclosedBracket { .. })
        ));
        assert!(matches!(
            TypeParser::parse("string[(1,5)"),
            Err(GrammarError::UnclosedBracket { .. })
        ));
        assert!(matches!(
            TypeParser::parse("string(/[a-/)"),
            Err(GrammarError::InvalidRegex { .. })
        ));
        assert!(matches!(
            TypeParser::parse("string(/abc)"),
            Err(GrammarError::MalformedConstraint { .. })
        ));
        assert_eq!(
            TypeParser::parse("string(1,5)x"),
            Err(GrammarError::TrailingInput {
                input: "string(1,5)x".to_string(),
                trailing: "x".to_string(),
            })
        );
        assert!(matches!(
            TypeParser::parse("a||b"),
            Err(GrammarError::EmptyUnionMember { .. })
        ));
    }

    #[test]
    fn test_parse_branch_accepts_bare_names() {
        let spec = TypeParser::parse_branch("enabled").unwrap();
        assert_eq!(
            spec.form,
            SpecifierForm::Union(vec![UnionMember::Literal("enabled".to_string())])
        );

        let typed = TypeParser::parse_branch("string?").unwrap();
        assert_eq!(typed.base_kind(), Some(BaseKind::String));

        assert!(TypeParser::parse_branch("string(1").is_err());
    }

    #[test]
    fn test_canonical_display() {
        for (input, canonical) in [
            ("string", "string"),
            ("string ( 2 , 50 ) ?", "string(2,50)?"),
            ("number(5)", "number(5,5)"),
            ("string()", "string"),
            ("string[](,)", "string[]"),
            ("=1.50", "=1.5"),
        ] {
            assert_eq!(TypeParser::parse(input).unwrap().to_string(), canonical);
        }
    }
}
