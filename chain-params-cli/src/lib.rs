//! Chain Params CLI - operator tooling for fork schedules
//!
//! # Usage
//!
//! ```text
//! chainparams [OPTIONS] <COMMAND>
//!
//! Commands:
//!   validate  Load a genesis file, fill defaults and check the fork schedule
//!   compat    Check whether a chain built under STORED can switch to NEW
//!   rules     List the forks active at a block
//!   blob      Show the blob parameters in force at a block
//!   show      Print the configuration after defaults are applied
//!
//! Options:
//!   -f, --format <FORMAT>        Output format (json, table, plain) [default: table]
//!   -v, --verbose                Enable log output on stderr
//!       --log-level <LOG_LEVEL>  [env: CHAIN_PARAMS_LOG_LEVEL] [default: info]
//! ```
//!
//! # Examples
//!
//! ```text
//! chainparams validate genesis.json
//! chainparams compat stored.json upgraded.json --height 250
//! CHAIN_PARAMS_GENESIS=genesis.json chainparams rules --block 100
//! ```
//!
//! `compat` exits with code 4 when the switch would rewrite processed blocks.

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
