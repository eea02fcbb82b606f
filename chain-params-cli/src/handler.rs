//! Command Handler
//!
//! Each command builds a serializable report and hands it to `output`.

use std::path::Path;

use chain_params::{BlobConfig, ChainConfig, ConfigCompatError, Fork};
use serde::Serialize;
use tracing::debug;

use crate::commands::{Cli, Commands, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;

/// One scheduled fork
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkEntry {
    pub fork: Fork,
    pub block: String,
}

/// Result of `validate`
#[derive(Debug, Clone, Serialize)]
pub struct ValidateReport {
    pub chain_id: Option<String>,
    pub forks: Vec<ForkEntry>,
    pub summary: String,
}

/// Result of `compat`
#[derive(Debug, Clone, Serialize)]
pub struct CompatReport {
    pub height: u64,
    pub compatible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<ConfigCompatError>,
}

/// Result of `rules`
#[derive(Debug, Clone, Serialize)]
pub struct RulesReport {
    pub block: u64,
    pub chain_id: String,
    pub active: Vec<Fork>,
}

/// Result of `blob`
#[derive(Debug, Clone, Serialize)]
pub struct BlobReport {
    pub block: u64,
    pub fork: Option<Fork>,
    pub config: Option<BlobConfig>,
    pub max_blobs: u64,
    pub target_blobs: u64,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> CliResult<()> {
    let format = cli.format;
    match cli.command {
        Commands::Validate { genesis } => {
            let report = validate(&genesis)?;
            output::print_validate(&report, format);
            Ok(())
        }
        Commands::Compat { stored, new, height } => {
            let report = compat(&stored, &new, height)?;
            output::print_compat(&report, format);
            match report.mismatch {
                Some(err) => Err(err.into()),
                None => Ok(()),
            }
        }
        Commands::Rules { genesis, block } => {
            let report = rules(&genesis, block)?;
            output::print_rules(&report, format);
            Ok(())
        }
        Commands::Blob { genesis, block } => {
            let report = blob(&genesis, block)?;
            output::print_blob(&report, format);
            Ok(())
        }
        Commands::Show { genesis } => {
            let config = load(&genesis)?;
            show(&config, format)
        }
    }
}

/// Load a genesis file: decode, fill defaults, validate
pub fn load(path: &Path) -> CliResult<ChainConfig> {
    if !path.is_file() {
        return Err(CliError::invalid_arg(format!(
            "{} is not a readable file",
            path.display()
        )));
    }
    let config = ChainConfig::load_genesis(path)?;
    debug!(path = %path.display(), "Genesis loaded");
    Ok(config)
}

pub fn validate(path: &Path) -> CliResult<ValidateReport> {
    let config = load(path)?;
    let forks = config
        .scheduled_forks()
        .map(|(fork, block)| ForkEntry {
            fork,
            block: block.to_string(),
        })
        .collect();
    Ok(ValidateReport {
        chain_id: config.chain_id.as_ref().map(|id| id.to_string()),
        forks,
        summary: config.to_string(),
    })
}

pub fn compat(stored: &Path, new: &Path, height: u64) -> CliResult<CompatReport> {
    let stored = load(stored)?;
    let new = load(new)?;
    let mismatch = stored.check_compatible(&new, height);
    Ok(CompatReport {
        height,
        compatible: mismatch.is_none(),
        mismatch,
    })
}

pub fn rules(path: &Path, block: u64) -> CliResult<RulesReport> {
    let config = load(path)?;
    let rules = config.rules(block);
    Ok(RulesReport {
        block,
        chain_id: rules.chain_id().to_string(),
        active: rules.active_forks().collect(),
    })
}

pub fn blob(path: &Path, block: u64) -> CliResult<BlobReport> {
    let config = load(path)?;
    Ok(BlobReport {
        block,
        fork: config.latest_blob_fork(block),
        config: config.blob_config(block).copied(),
        max_blobs: config.max_blobs_per_block(block),
        target_blobs: config.target_blobs_per_block(block),
    })
}

fn show(config: &ChainConfig, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", config.to_json()?),
        OutputFormat::Table | OutputFormat::Plain => println!("{}", config),
    }
    Ok(())
}
