//! CLI configuration
//!
//! Layered in order: `.env`, an optional `typeline.{yaml,toml,json}` file
//! (or the file given with `--config`), then `TYPELINE_*` environment
//! variables. Command line flags are applied on top by the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use typeline_sdk::EngineConfig;

/// Settings read from the config file and the environment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub allow_unknown_fields: bool,
    pub warn_unresolved_conditions: bool,
    pub fail_fast: bool,
    pub max_nesting_depth: usize,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            allow_unknown_fields: engine.allow_unknown_fields,
            warn_unresolved_conditions: engine.warn_unresolved_conditions,
            fail_fast: engine.fail_fast,
            max_nesting_depth: engine.max_nesting_depth,
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("typeline").required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("TYPELINE").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Engine settings
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .allow_unknown_fields(self.allow_unknown_fields)
            .warn_unresolved_conditions(self.warn_unresolved_conditions)
            .fail_fast(self.fail_fast)
            .with_max_nesting_depth(self.max_nesting_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_config_default() {
        let config = CliConfig::default();
        assert!(config.allow_unknown_fields);
        assert!(config.pretty);
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fail_fast = true\nmax_nesting_depth = 4\npretty = false").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert!(config.fail_fast);
        assert!(!config.pretty);
        assert_eq!(config.engine_config().max_nesting_depth, 4);
        assert!(config.engine_config().allow_unknown_fields);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(CliConfig::load(Some(Path::new("/nonexistent/typeline.toml"))).is_err());
    }
}
