//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Generates npm client packages for RSocket services.
///
/// Reads service reflection documents (JSON or TOML) and writes a
/// `package.json`, `index.js` and `index.d.ts` that call the service over
/// RSocket.
#[derive(Parser, Debug)]
#[command(name = "rsocket-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "RSOCKET_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the contract of a service: methods, interaction modes and types.
    ///
    /// ```bash
    /// rsocket-export inspect contracts/account.json
    /// ```
    Inspect {
        /// Service reflection document
        document: PathBuf,

        /// Sort methods by name instead of declaration order
        #[arg(long)]
        alphabetical: bool,
    },

    /// Generate the npm package for a service.
    ///
    /// ```bash
    /// rsocket-export generate contracts/account.json --output ./npm
    /// rsocket-export generate contracts/account.json --archive account.tgz
    /// ```
    Generate(GenerateArgs),

    /// Generate shell completions.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options of the `generate` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Service reflection document
    pub document: PathBuf,

    /// npm package name (defaults to the name advertised by the service,
    /// then to its short name)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package version (defaults to today's date as YYYY.MM.DD)
    #[arg(long)]
    pub version: Option<String>,

    /// Package description
    #[arg(long)]
    pub description: Option<String>,

    /// Directory the package directory is written into
    #[arg(short, long, conflicts_with = "archive")]
    pub output: Option<PathBuf>,

    /// Write a tar+gzip archive instead of a directory
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Skip `index.d.ts`
    #[arg(long)]
    pub no_declarations: bool,

    /// Sort methods by name instead of declaration order
    #[arg(long)]
    pub alphabetical: bool,
}
