//! `rsocket-export` command-line interface.
//!
//! ```bash
//! # Show how a service resolves
//! rsocket-export inspect contracts/account.json
//!
//! # Write the package directory into ./npm
//! rsocket-export generate contracts/account.json --output ./npm
//!
//! # Or a tarball that npm can install directly
//! rsocket-export generate contracts/account.json --archive account.tgz
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rsocket_export_cli::cli::Cli;
use rsocket_export_cli::{execute, exit_code_for};
use rsocket_export_core::ExportConfig;
use rsocket_export_core::cli::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let config = ExportConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let exit_code = match execute(cli, &config, format) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
