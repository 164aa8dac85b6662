//! CLI for ABD.

mod commands;

use abd_core::config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_discover, run_strategies};

/// Top-level CLI for ABD.
#[derive(Debug, Parser)]
#[command(name = "abd")]
#[command(about = "abd - the appc Binary Discovery")]
#[command(
    long_about = "abd is a framework for resolving human-readable strings to downloadable URIs"
)]
pub struct Cli {
    /// Configuration directory for abd (stanza files).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Strategy directory for abd (abd-<strategy> programs).
    #[arg(long, global = true, value_name = "DIR")]
    pub strategy_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Discover an artifact: abd discover identifier,label1=value1,label2=value2,...
    Discover {
        /// Identifier, optionally followed by comma-separated label=value pairs.
        input: String,
    },

    /// List configured stanzas in selection order and their strategy programs.
    Strategies,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let settings = config::load_or_default()?.with_overrides(cli.config_dir, cli.strategy_dir);
        tracing::debug!("loaded settings: {:?}", settings);

        match cli.command {
            CliCommand::Discover { input } => run_discover(&settings, &input)?,
            CliCommand::Strategies => run_strategies(&settings)?,
        }

        Ok(())
    }
}
