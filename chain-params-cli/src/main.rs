//! chainparams entry point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.

use chain_params::logging::LogLevel;
use chain_params_cli::{handler, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        init_logging(cli.log_level);
    }

    if let Err(e) = handler::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging with tracing; RUST_LOG takes precedence over --log-level
fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chain_params={level},chain_params_cli={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
