//! Membership operators: `in` and `!in`
//!
//! The operand is a comma separated list, optionally wrapped in `()` or `[]`.
//! Members and the field value are trimmed before comparing; members wrapped
//! in matching quotes are unquoted.

use super::stringify;
use typeline_core::{OperatorKind, Value};

pub(super) fn evaluate(kind: OperatorKind, value: Option<&Value>, raw: &str) -> bool {
    let found = contains_member(raw, stringify(value).trim());
    match kind {
        OperatorKind::In => found,
        OperatorKind::NotIn => !found,
        _ => false,
    }
}

fn contains_member(raw: &str, needle: &str) -> bool {
    list_members(raw).any(|member| member == needle)
}

fn list_members(raw: &str) -> impl Iterator<Item = &str> {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .or_else(|| raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')))
        .unwrap_or(raw);

    inner.split(',').map(|member| unquote(member.trim()))
}

fn unquote(member: &str) -> &str {
    for quote in ['"', '\''] {
        if member.len() >= 2 && member.starts_with(quote) && member.ends_with(quote) {
            return &member[1..member.len() - 1];
        }
    }
    member
}
