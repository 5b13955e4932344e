//! Evaluation engine
//!
//! Evaluates conditions against payloads and picks the branch of a
//! conditional rule to validate against.

pub mod evaluator;
mod operators;

#[cfg(test)]
mod tests;

// Re-export for convenience
pub use evaluator::{evaluate_expression, evaluate_rule, select_branch};
pub use operators::evaluate_condition;
