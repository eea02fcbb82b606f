//! CLI Commands
//!
//! Argument definitions for the `chainparams` tool.

use std::path::PathBuf;

use chain_params::logging::LogLevel;
use clap::{Parser, Subcommand};

/// Hard fork schedule inspector
#[derive(Parser, Debug)]
#[command(name = "chainparams")]
#[command(author = "Rainbow City Foundation")]
#[command(version)]
#[command(about = "Inspect and check chain fork schedules")]
#[command(long_about = "A command-line tool for genesis fork schedules.\n\n\
    Use this tool to validate a genesis file, list the forks active at a block, \
    show blob parameters, and check whether a node can switch from one \
    configuration to another without rewinding.")]
pub struct Cli {
    /// Output format (json, table, plain)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Enable log output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level used with --verbose when RUST_LOG is unset
    #[arg(long, env = "CHAIN_PARAMS_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table format (human-readable)
    #[default]
    Table,
    /// Plain text
    Plain,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a genesis file, fill defaults and check the fork schedule
    Validate {
        /// Genesis file (env: CHAIN_PARAMS_GENESIS)
        #[arg(env = "CHAIN_PARAMS_GENESIS")]
        genesis: PathBuf,
    },

    /// Check whether a chain built under STORED can switch to NEW
    Compat {
        /// Configuration the chain was built with
        stored: PathBuf,
        /// Replacement configuration
        new: PathBuf,
        /// Current chain head
        #[arg(long)]
        height: u64,
    },

    /// List the forks active at a block
    Rules {
        /// Genesis file (env: CHAIN_PARAMS_GENESIS)
        #[arg(env = "CHAIN_PARAMS_GENESIS")]
        genesis: PathBuf,
        /// Block number
        #[arg(short, long)]
        block: u64,
    },

    /// Show the blob parameters in force at a block
    Blob {
        /// Genesis file (env: CHAIN_PARAMS_GENESIS)
        #[arg(env = "CHAIN_PARAMS_GENESIS")]
        genesis: PathBuf,
        /// Block number
        #[arg(short, long)]
        block: u64,
    },

    /// Print the configuration after defaults are applied
    Show {
        /// Genesis file (env: CHAIN_PARAMS_GENESIS)
        #[arg(env = "CHAIN_PARAMS_GENESIS")]
        genesis: PathBuf,
    },
}
