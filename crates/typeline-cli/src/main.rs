//! typeline command line tool
//!
//! - `typeline parse <expression>` prints the canonical form of a descriptor
//! - `typeline check <schema>` reports grammar errors per field
//! - `typeline validate <schema> <payload.json>` prints the validation result
//!
//! Exits with status 1 when the command fails.

mod commands;
mod config;

use crate::config::CliConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "typeline")]
#[command(about = "Parse, check and apply typeline schemas")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ./typeline.{yaml,toml,json} when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a type string or conditional expression
    Parse {
        expression: String,

        /// Print the parsed structure as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report grammar errors in every field of a schema
    Check { schema: PathBuf },

    /// Validate a JSON payload against a schema
    Validate {
        schema: PathBuf,

        /// Payload file, `-` for stdin
        payload: PathBuf,

        /// Stop at the first failing field
        #[arg(long)]
        fail_fast: bool,

        /// Reject top-level fields the schema does not declare
        #[arg(long)]
        deny_unknown: bool,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.compact {
        config.pretty = false;
    }

    let ok = match cli.command {
        Commands::Parse { expression, json } => commands::parse(&expression, json, &config)?,
        Commands::Check { schema } => commands::check(&schema, &config)?,
        Commands::Validate {
            schema,
            payload,
            fail_fast,
            deny_unknown,
        } => {
            config.fail_fast |= fail_fast;
            if deny_unknown {
                config.allow_unknown_fields = false;
            }
            commands::validate(&schema, &payload, &config)?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Initialize tracing subscriber, logging to stderr
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typeline_sdk=info,typeline_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
