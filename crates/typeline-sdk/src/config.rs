//! Configuration types for SchemaEngine

use serde::{Deserialize, Serialize};
use typeline_parser::DEFAULT_MAX_DEPTH;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Accept top-level payload fields the schema does not declare
    pub allow_unknown_fields: bool,

    /// Warn when a condition compares a field that does not resolve
    pub warn_unresolved_conditions: bool,

    /// Stop after the first failing field
    pub fail_fast: bool,

    /// Deepest conditional nesting accepted when loading a schema
    pub max_nesting_depth: usize,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            allow_unknown_fields: true,
            warn_unresolved_conditions: true,
            fail_fast: false,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Accept or reject undeclared top-level fields
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Enable unresolved condition field warnings
    pub fn warn_unresolved_conditions(mut self, warn: bool) -> Self {
        self.warn_unresolved_conditions = warn;
        self
    }

    /// Stop at the first failing field
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set the conditional nesting bound
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
