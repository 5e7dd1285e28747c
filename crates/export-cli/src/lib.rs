//! `rsocket-export` command-line library.
//!
//! Exposes the argument definitions, commands and formatters so that they
//! can be tested without spawning the binary.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;

use anyhow::Result;
use clap::CommandFactory;
use cli::{Cli, Commands};
use rsocket_export_core::cli::{ExitCode, OutputFormat};
use rsocket_export_core::{ExportConfig, MethodOrdering};

/// Dispatches a parsed command line.
pub fn execute(cli: Cli, config: &ExportConfig, format: OutputFormat) -> Result<ExitCode> {
    match cli.command {
        Commands::Inspect {
            document,
            alphabetical,
        } => {
            let ordering = if alphabetical {
                MethodOrdering::Alphabetical
            } else {
                config.method_ordering
            };
            commands::inspect::run(&document, ordering, format)
        }
        Commands::Generate(args) => commands::generate::run(&args, config, format),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}

/// Exit code for a failed command.
///
/// Library errors anywhere in the context chain decide the code; anything
/// else is a generic failure.
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<rsocket_export_core::Error>()
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}
