//! Type specifiers
//!
//! A `TypeSpecifier` is the parsed form of a single type string such as
//! `string(2,50)?`, `number[](1,5)`, `admin|user|guest` or `=active`.
//! Exactly one of three forms is active: a plain base kind, a union, or a
//! constant. `Display` writes the canonical type string back out.

use super::pattern::CompiledPattern;
use super::value::{format_number, Value};
use crate::operator::DataKind;
use std::fmt;

/// Base kinds recognised by the type grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    String,
    Number,
    Boolean,
    Date,
    Object,
    Record,
    Any,
}

impl BaseKind {
    /// All recognised kinds
    pub const ALL: [BaseKind; 7] = [
        BaseKind::String,
        BaseKind::Number,
        BaseKind::Boolean,
        BaseKind::Date,
        BaseKind::Object,
        BaseKind::Record,
        BaseKind::Any,
    ];

    /// Look a kind up by its grammar name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(BaseKind::String),
            "number" => Some(BaseKind::Number),
            "boolean" => Some(BaseKind::Boolean),
            "date" => Some(BaseKind::Date),
            "object" => Some(BaseKind::Object),
            "record" => Some(BaseKind::Record),
            "any" => Some(BaseKind::Any),
            _ => None,
        }
    }

    /// Grammar name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            BaseKind::String => "string",
            BaseKind::Number => "number",
            BaseKind::Boolean => "boolean",
            BaseKind::Date => "date",
            BaseKind::Object => "object",
            BaseKind::Record => "record",
            BaseKind::Any => "any",
        }
    }

    /// Operator data kind, `None` for `any`
    pub fn data_kind(&self) -> Option<DataKind> {
        match self {
            BaseKind::String => Some(DataKind::String),
            BaseKind::Number => Some(DataKind::Number),
            BaseKind::Boolean => Some(DataKind::Boolean),
            BaseKind::Date => Some(DataKind::Date),
            BaseKind::Object | BaseKind::Record => Some(DataKind::Object),
            BaseKind::Any => None,
        }
    }

    /// Whether a `(min,max)` constraint may follow the kind
    pub fn accepts_range(&self) -> bool {
        matches!(self, BaseKind::String | BaseKind::Number)
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive numeric bounds, either side open
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    /// Create bounds
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Both sides open
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |v: Option<f64>| v.map(format_number).unwrap_or_default();
        write!(f, "({},{})", side(self.min), side(self.max))
    }
}

/// Constraint attached to a base kind
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Length bounds for strings, value bounds for numbers
    Range(Bounds),
    /// Regular expression, string kind only
    Pattern(CompiledPattern),
}

/// A literal value used by constants
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// Coerce raw literal text: `true`/`false` become booleans, numeric
    /// literals become numbers, anything else stays a string
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            _ if is_numeric_literal(raw) => raw
                .parse::<f64>()
                .map(Literal::Number)
                .unwrap_or_else(|_| Literal::String(raw.to_string())),
            _ => Literal::String(raw.to_string()),
        }
    }

    /// Exact match against a payload value
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::String(s) => f.write_str(s),
        }
    }
}

/// `-?\d+(\.\d+)?`
pub fn is_numeric_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

/// One member of a union
#[derive(Debug, Clone, PartialEq)]
pub enum UnionMember {
    /// Member that names a base type (`string`, `number(0,5)`)
    Type(TypeSpecifier),
    /// Arbitrary literal (`admin`)
    Literal(String),
}

impl fmt::Display for UnionMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnionMember::Type(spec) => write!(f, "{}", spec),
            UnionMember::Literal(s) => f.write_str(&s.replace('|', "\\|")),
        }
    }
}

/// Which of the three mutually exclusive forms a specifier takes
#[derive(Debug, Clone, PartialEq)]
pub enum SpecifierForm {
    Base(BaseKind),
    Union(Vec<UnionMember>),
    Constant(Literal),
}

/// Parsed type string
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpecifier {
    /// Active form
    pub form: SpecifierForm,
    /// Constraint on the base kind (base form only)
    pub constraint: Option<Constraint>,
    /// Missing values are accepted
    pub optional: bool,
    /// Array of the base kind, with optional item count bounds
    pub array: Option<Bounds>,
}

impl TypeSpecifier {
    /// Plain base kind
    pub fn base(kind: BaseKind) -> Self {
        Self {
            form: SpecifierForm::Base(kind),
            constraint: None,
            optional: false,
            array: None,
        }
    }

    /// Union of members
    pub fn union(members: Vec<UnionMember>) -> Self {
        Self {
            form: SpecifierForm::Union(members),
            constraint: None,
            optional: false,
            array: None,
        }
    }

    /// Constant literal
    pub fn constant(literal: Literal) -> Self {
        Self {
            form: SpecifierForm::Constant(literal),
            constraint: None,
            optional: false,
            array: None,
        }
    }

    /// Set optionality
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Attach a `(min,max)` constraint
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraint = Some(Constraint::Range(Bounds::new(min, max)));
        self
    }

    /// Attach a regex constraint
    pub fn with_pattern(mut self, pattern: CompiledPattern) -> Self {
        self.constraint = Some(Constraint::Pattern(pattern));
        self
    }

    /// Turn into an array of this kind
    pub fn with_array(mut self, bounds: Bounds) -> Self {
        self.array = Some(bounds);
        self
    }

    /// Base kind, when the base form is active
    pub fn base_kind(&self) -> Option<BaseKind> {
        match self.form {
            SpecifierForm::Base(kind) => Some(kind),
            _ => None,
        }
    }

    /// Union members, empty unless the union form is active
    pub fn union_members(&self) -> &[UnionMember] {
        match &self.form {
            SpecifierForm::Union(members) => members,
            _ => &[],
        }
    }

    /// Constant value, when the constant form is active
    pub fn constant_value(&self) -> Option<&Literal> {
        match &self.form {
            SpecifierForm::Constant(literal) => Some(literal),
            _ => None,
        }
    }

    /// Lower bound of a range constraint
    pub fn constraint_min(&self) -> Option<f64> {
        match &self.constraint {
            Some(Constraint::Range(bounds)) => bounds.min,
            _ => None,
        }
    }

    /// Upper bound of a range constraint
    pub fn constraint_max(&self) -> Option<f64> {
        match &self.constraint {
            Some(Constraint::Range(bounds)) => bounds.max,
            _ => None,
        }
    }

    /// Regex constraint
    pub fn constraint_regex(&self) -> Option<&CompiledPattern> {
        match &self.constraint {
            Some(Constraint::Pattern(pattern)) => Some(pattern),
            _ => None,
        }
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    /// Human readable expectation used in validation messages
    pub fn expected(&self) -> String {
        let mut spec = self.clone();
        spec.optional = false;
        spec.to_string()
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.form {
            SpecifierForm::Constant(literal) => write!(f, "={}", literal)?,
            SpecifierForm::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", member)?;
                }
            }
            SpecifierForm::Base(kind) => {
                write!(f, "{}", kind)?;
                match &self.constraint {
                    Some(Constraint::Range(bounds)) => write!(f, "{}", bounds)?,
                    Some(Constraint::Pattern(pattern)) => write!(f, "({})", pattern)?,
                    None => {}
                }
                if let Some(bounds) = &self.array {
                    f.write_str("[]")?;
                    if !bounds.is_open() {
                        write!(f, "{}", bounds)?;
                    }
                }
            }
        }
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}
