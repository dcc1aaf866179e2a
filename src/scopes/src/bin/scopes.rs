//! # Nested Scopes CLI
//!
//! Validates scope hierarchies and previews how route access declarations are
//! rewritten.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `CRETOAI_SCOPES_CONFIG` - Path to the transform configuration (TOML or JSON)
//! - `RUST_LOG` - Log level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cretoai_scopes::{expand_scopes, AccessConfig, NestedScopes, SelectedRule, TransformConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// CretoAI Nested Scopes CLI
#[derive(Parser)]
#[command(name = "cretoai-scopes")]
#[command(about = "Expand nested scope declarations into flat scope lists")]
#[command(version)]
struct Cli {
    /// Path to the transform configuration
    #[arg(short, long, default_value = "scopes.toml", env = "CRETOAI_SCOPES_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the scope hierarchy
    Check,

    /// Expand scope tokens, e.g. `[+user]` or `[!dad]`
    Expand {
        /// Scope tokens; unbracketed tokens are printed unchanged
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Rewrite a JSON access declaration
    Rewrite {
        /// JSON file holding one access rule or a list of rules
        file: PathBuf,
    },

    /// Rewrite a JSON access declaration and split each rule by modifier
    Normalize {
        /// JSON file holding one access rule or a list of rules
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},cretoai_scopes=debug", log_level).into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = TransformConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    info!("Loaded configuration from {:?}", cli.config);

    let graph = config.validate().context("Invalid scope hierarchy")?;

    match cli.command {
        Command::Check => {
            println!(
                "{} scopes declared, roots: {}",
                graph.len(),
                graph.roots().join(", ")
            );
        }
        Command::Expand { tokens } => {
            for scope in expand_scopes(&tokens, &graph)? {
                println!("{}", scope);
            }
        }
        Command::Rewrite { file } => {
            let rewritten = rewrite_file(&config, &file)?;
            println!("{}", serde_json::to_string_pretty(&rewritten)?);
        }
        Command::Normalize { file } => {
            let rewritten = rewrite_file(&config, &file)?;
            let normalized: Vec<SelectedRule> =
                rewritten.rules().iter().map(SelectedRule::from).collect();
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
    }

    Ok(())
}

fn rewrite_file(config: &TransformConfig, path: &Path) -> Result<AccessConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read access declaration {:?}", path))?;
    let access: AccessConfig =
        serde_json::from_str(&contents).context("Failed to parse access declaration")?;

    let transform = NestedScopes::from_config(config);
    let rewritten = transform.apply(&config.realm, &access)?;

    Ok(rewritten)
}
