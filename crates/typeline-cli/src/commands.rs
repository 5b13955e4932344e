//! Subcommand implementations. Each returns whether the command succeeded.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use typeline_parser::ConditionalParser;
use typeline_sdk::{Descriptor, Schema, SchemaEngineBuilder, SchemaFormat};

use crate::config::CliConfig;

/// Parsed expression summary printed by `parse --json`
#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub canonical: String,
    pub conditional: bool,
    pub depth: usize,
    pub referenced_fields: Vec<String>,
    pub branches: Vec<String>,
}

impl ParseReport {
    pub fn new(descriptor: &Descriptor) -> Self {
        Self {
            canonical: descriptor.to_string(),
            conditional: descriptor.is_conditional(),
            depth: descriptor.depth(),
            referenced_fields: descriptor
                .referenced_fields()
                .iter()
                .map(|path| path.to_string())
                .collect(),
            branches: descriptor
                .branches()
                .iter()
                .map(|spec| spec.to_string())
                .collect(),
        }
    }
}

/// `typeline parse <expression>`
pub fn parse(expression: &str, json: bool, config: &CliConfig) -> Result<bool> {
    let parser = ConditionalParser::new().with_max_depth(config.max_nesting_depth);
    match parser.parse(expression) {
        Ok(descriptor) => {
            if json {
                print_json(&ParseReport::new(&descriptor), config.pretty)?;
            } else {
                println!("{}", descriptor);
            }
            Ok(true)
        }
        Err(error) => {
            eprintln!("error: {}", error);
            Ok(false)
        }
    }
}

/// `typeline check <schema>`
pub fn check(schema: &Path, config: &CliConfig) -> Result<bool> {
    let text = std::fs::read_to_string(schema)
        .with_context(|| format!("Failed to read schema {}", schema.display()))?;
    let parser = ConditionalParser::new().with_max_depth(config.max_nesting_depth);
    let diagnostics = Schema::diagnose(&text, SchemaFormat::from_path(schema), &parser)
        .with_context(|| format!("Failed to load schema {}", schema.display()))?;

    if diagnostics.is_empty() {
        println!("{}: ok", schema.display());
        return Ok(true);
    }
    for diagnostic in &diagnostics {
        println!(
            "{}: field '{}': {} (in \"{}\")",
            schema.display(),
            diagnostic.field,
            diagnostic.error,
            diagnostic.source
        );
    }
    tracing::warn!("{} field(s) failed to parse", diagnostics.len());
    Ok(false)
}

/// `typeline validate <schema> <payload>`; `-` reads the payload from stdin
pub fn validate(schema: &Path, payload: &Path, config: &CliConfig) -> Result<bool> {
    let engine = SchemaEngineBuilder::new()
        .add_schema_file(schema)
        .config(config.engine_config())
        .build()
        .with_context(|| format!("Failed to load schema {}", schema.display()))?;

    let text = if payload == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read payload from stdin")?;
        text
    } else {
        std::fs::read_to_string(payload)
            .with_context(|| format!("Failed to read payload {}", payload.display()))?
    };

    let result = engine
        .validate_json(&text)
        .context("Payload is not valid JSON")?;
    print_json(&result, config.pretty)?;
    Ok(result.valid)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
