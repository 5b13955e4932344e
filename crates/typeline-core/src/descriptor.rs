//! Field descriptors
//!
//! A field in a schema is described either by a plain type specifier or by a
//! conditional rule that picks one of two descriptors from a condition over
//! the payload:
//!
//! ```text
//! string(2,50)?
//! when age>=18 *? string : =minor
//! when tier=gold *? when region=eu *? number(0,100) : number : =0
//! ```

use crate::condition::ConditionExpression;
use crate::path::FieldPath;
use crate::types::TypeSpecifier;
use std::fmt;

/// Parsed field descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// Plain type
    Type(TypeSpecifier),
    /// Condition selecting between two descriptors
    Rule(ConditionalRule),
}

/// `when <condition> *? <then> : <else>`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalRule {
    pub condition: ConditionExpression,
    pub then_branch: Box<Descriptor>,
    pub else_branch: Box<Descriptor>,
}

impl ConditionalRule {
    /// Create a rule
    pub fn new(condition: ConditionExpression, then_branch: Descriptor, else_branch: Descriptor) -> Self {
        Self {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Nesting depth of the rule, 1 for a rule whose branches are plain types
    pub fn depth(&self) -> usize {
        1 + self.then_branch.depth().max(self.else_branch.depth())
    }

    /// Field paths read by this rule and every nested rule
    pub fn referenced_fields(&self) -> Vec<&FieldPath> {
        let mut fields = Vec::new();
        collect_rule_fields(self, &mut fields);
        fields
    }
}

impl Descriptor {
    /// Whether the descriptor is conditional
    pub fn is_conditional(&self) -> bool {
        matches!(self, Descriptor::Rule(_))
    }

    /// Type specifier of a plain descriptor
    pub fn as_type(&self) -> Option<&TypeSpecifier> {
        match self {
            Descriptor::Type(spec) => Some(spec),
            Descriptor::Rule(_) => None,
        }
    }

    /// Conditional rule of a conditional descriptor
    pub fn as_rule(&self) -> Option<&ConditionalRule> {
        match self {
            Descriptor::Rule(rule) => Some(rule),
            Descriptor::Type(_) => None,
        }
    }

    /// Number of nested rules on the deepest branch
    pub fn depth(&self) -> usize {
        match self {
            Descriptor::Type(_) => 0,
            Descriptor::Rule(rule) => rule.depth(),
        }
    }

    /// Every leaf type specifier reachable through the branches
    pub fn branches(&self) -> Vec<&TypeSpecifier> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }

    /// Every field path read by a condition, in reading order, deduplicated
    pub fn referenced_fields(&self) -> Vec<&FieldPath> {
        let mut fields: Vec<&FieldPath> = Vec::new();
        collect_fields(self, &mut fields);
        fields
    }
}

fn collect_leaves<'a>(descriptor: &'a Descriptor, out: &mut Vec<&'a TypeSpecifier>) {
    match descriptor {
        Descriptor::Type(spec) => out.push(spec),
        Descriptor::Rule(rule) => {
            collect_leaves(&rule.then_branch, out);
            collect_leaves(&rule.else_branch, out);
        }
    }
}

fn collect_fields<'a>(descriptor: &'a Descriptor, out: &mut Vec<&'a FieldPath>) {
    if let Descriptor::Rule(rule) = descriptor {
        collect_rule_fields(rule, out);
    }
}

fn collect_rule_fields<'a>(rule: &'a ConditionalRule, out: &mut Vec<&'a FieldPath>) {
    for predicate in rule.condition.predicates() {
        if !out.contains(&&predicate.field) {
            out.push(&predicate.field);
        }
    }
    collect_fields(&rule.then_branch, out);
    collect_fields(&rule.else_branch, out);
}

impl From<TypeSpecifier> for Descriptor {
    fn from(spec: TypeSpecifier) -> Self {
        Descriptor::Type(spec)
    }
}

impl From<ConditionalRule> for Descriptor {
    fn from(rule: ConditionalRule) -> Self {
        Descriptor::Rule(rule)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Type(spec) => write!(f, "{}", spec),
            Descriptor::Rule(rule) => write!(f, "{}", rule),
        }
    }
}

impl fmt::Display for ConditionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when {} *? {} : {}",
            self.condition, self.then_branch, self.else_branch
        )
    }
}
