//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Transition graph generator CLI
#[derive(Parser, Debug)]
#[command(name = "transition-graph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Graphviz graph for a given target type
    Generate {
        /// Fully qualified name of the target type
        target: String,

        /// Declaration manifest (overrides config)
        #[arg(short, long, env = "TRANSITION_GRAPH_MANIFEST")]
        manifest: Option<PathBuf>,
    },

    /// Summarize the graph of a target type
    Stats {
        /// Fully qualified name of the target type
        target: String,

        /// Declaration manifest (overrides config)
        #[arg(short, long, env = "TRANSITION_GRAPH_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// List the target types declared in a manifest
    Targets {
        /// Declaration manifest (overrides config)
        #[arg(short, long, env = "TRANSITION_GRAPH_MANIFEST")]
        manifest: Option<PathBuf>,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Generate { target, manifest } => {
            commands::generate::execute(&target, config.manifest_path(manifest))
        }
        Commands::Stats {
            target,
            manifest,
            output,
        } => commands::stats::execute(&target, config.manifest_path(manifest), output),
        Commands::Targets { manifest } => commands::targets::execute(config.manifest_path(manifest)),
    }
}
