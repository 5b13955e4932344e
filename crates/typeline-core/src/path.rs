//! Field paths
//!
//! A field path addresses a value inside a nested payload:
//! `user.profile.age`, `items[0].sku`, `items.0.sku`, `meta["first name"]`,
//! `meta['x-trace-id']`. Parsing never fails; resolution lives in the runtime.

use std::fmt;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Bare identifier (`user`)
    Key(String),
    /// Numeric segment, either `[0]` or `.0`
    Index(usize),
    /// Bracket quoted key (`["first name"]`), always a literal property key
    Quoted(String),
}

/// Parsed field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a path from segments
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse a path string. Any input is accepted.
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = input.trim().chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => push_bare(&mut segments, &mut current),
                '[' => {
                    push_bare(&mut segments, &mut current);
                    let mut inner = String::new();
                    let mut quote: Option<char> = None;
                    let mut quoted = false;
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match quote {
                            Some(q) if c == q => quote = None,
                            Some(_) => inner.push(c),
                            None => match c {
                                '"' | '\'' if !quoted && inner.trim().is_empty() => {
                                    inner.clear();
                                    quote = Some(c);
                                    quoted = true;
                                }
                                ']' => {
                                    closed = true;
                                    break;
                                }
                                _ => inner.push(c),
                            },
                        }
                    }
                    if !closed {
                        // unterminated bracket: keep the remainder as a plain key
                        current = inner;
                        continue;
                    }
                    if quoted {
                        segments.push(PathSegment::Quoted(inner));
                    } else if let Some(segment) = bracket_segment(&inner) {
                        segments.push(segment);
                    }
                }
                _ => current.push(c),
            }
        }
        push_bare(&mut segments, &mut current);

        Self { segments }
    }

    /// Strict syntax check used by the condition tokenizer:
    /// `identifier(.identifier | .N | [N] | ["key"] | ['key'])*`
    pub fn is_valid_syntax(input: &str) -> bool {
        let input = input.trim();
        let chars: Vec<char> = input.chars().collect();
        if chars.is_empty() || !is_ident_char(chars[0]) {
            return false;
        }

        let mut i = 0;
        let mut expect_ident = true;
        while i < chars.len() {
            let c = chars[i];
            if expect_ident {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == start {
                    return false;
                }
                expect_ident = false;
                continue;
            }
            match c {
                '.' => {
                    expect_ident = true;
                    i += 1;
                }
                '[' => {
                    i += 1;
                    match chars.get(i) {
                        Some(&q) if q == '"' || q == '\'' => {
                            i += 1;
                            let start = i;
                            while i < chars.len() && chars[i] != q {
                                i += 1;
                            }
                            if i >= chars.len() || i == start {
                                return false;
                            }
                            i += 1;
                        }
                        Some(d) if d.is_ascii_digit() => {
                            while i < chars.len() && chars[i].is_ascii_digit() {
                                i += 1;
                            }
                        }
                        _ => return false,
                    }
                    if chars.get(i) != Some(&']') {
                        return false;
                    }
                    i += 1;
                }
                _ => return false,
            }
        }
        !expect_ident
    }

    /// Path segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// First segment as a key, used to match top-level payload fields
    pub fn root_key(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Key(k)) | Some(PathSegment::Quoted(k)) => Some(k),
            _ => None,
        }
    }

    /// Returns true when the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
                PathSegment::Index(n) => write!(f, "[{}]", n)?,
                PathSegment::Quoted(k) => {
                    if k.contains('"') {
                        write!(f, "['{}']", k)?;
                    } else {
                        write!(f, "[\"{}\"]", k)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(input: &str) -> Self {
        FieldPath::parse(input)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn push_bare(segments: &mut Vec<PathSegment>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<usize>() {
                segments.push(PathSegment::Index(n));
                current.clear();
                return;
            }
        }
        segments.push(PathSegment::Key(trimmed.to_string()));
    }
    current.clear();
}

fn bracket_segment(inner: &str) -> Option<PathSegment> {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = trimmed.parse::<usize>() {
            return Some(PathSegment::Index(n));
        }
    }
    Some(PathSegment::Quoted(trimmed.to_string()))
}
