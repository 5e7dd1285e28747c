//! Generate command implementation.
//!
//! Resolves one reflection document and writes its npm package, either as a
//! directory tree or as a tar+gzip archive.

use crate::cli::GenerateArgs;
use crate::formatters::{Report, field, format_output, success};
use anyhow::{Context, Result};
use rsocket_export_codegen::{ExportGenerator, PackageSpec};
use rsocket_export_core::cli::{ExitCode, OutputFormat};
use rsocket_export_core::{Error, ExportConfig, MethodOrdering, PackageName, PackageVersion};
use rsocket_export_files::{ArchiveOptions, FilesBuilder, archive_generated_code, expand_tilde};
use rsocket_export_introspector::{Introspector, ServiceReflection};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of one generation run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// npm package name
    pub package: String,
    /// Package version
    pub version: String,
    /// Generated files, relative to the destination
    pub files: Vec<String>,
    /// Total size of generated content in bytes
    pub bytes: usize,
    /// Directory or archive written
    pub destination: String,
    /// Whether the destination is a tarball
    pub archive: bool,
}

impl Report for GenerateReport {
    fn pretty(&self) -> String {
        let mut out = success(&format!("Generated {} {}", self.package, self.version));
        out.push('\n');
        for file in &self.files {
            let _ = writeln!(out, "  {file}");
        }
        let kind = if self.archive { "archive" } else { "directory" };
        let _ = writeln!(out, "{}", field(kind, &self.destination));
        let _ = write!(out, "{}", field("size", format!("{} bytes", self.bytes)));
        out
    }
}

/// Runs the generate command.
///
/// Flags win over the document and the configuration: `--package-name`
/// over the advertised package, `--alphabetical` over `method_ordering`,
/// `--no-declarations` over `emit_declarations`.
///
/// # Errors
///
/// Returns an error if the document cannot be read, the service has no
/// exported methods, the package name is invalid, or writing fails.
pub fn run(args: &GenerateArgs, config: &ExportConfig, format: OutputFormat) -> Result<ExitCode> {
    let ordering = if args.alphabetical {
        MethodOrdering::Alphabetical
    } else {
        config.method_ordering
    };

    let doc = ServiceReflection::from_path(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let contract = Introspector::with_ordering(ordering)
        .introspect(&doc)
        .with_context(|| format!("failed to introspect {}", doc.type_name))?;

    if contract.is_empty() {
        warn!("{} exports no methods", contract.route);
        return Err(Error::ContractNotFound {
            name: contract.route.as_str().to_string(),
        })
        .context("nothing to generate");
    }

    let short = contract.short_name();
    let name = match (&args.package_name, &contract.npm_package) {
        (Some(name), _) => PackageName::new(name.as_str()).context("invalid --package-name")?,
        (None, Some(advertised)) => advertised.clone(),
        (None, None) => PackageName::new(short).context("service short name is not a valid package name")?,
    };
    let version = args
        .version
        .as_ref()
        .map_or_else(PackageVersion::today, PackageVersion::new);
    let description = args.description.clone().unwrap_or_else(|| {
        format!(
            "npm package to call RSocket {short} from {} App",
            config.application_name
        )
    });

    let spec = PackageSpec::new(name, version)
        .with_description(description)
        .with_declarations(config.emit_declarations && !args.no_declarations);

    let code = ExportGenerator::new()?.generate(&contract, &spec)?;
    let files: Vec<String> = code.files().map(|f| f.path().to_string()).collect();
    let bytes = code.total_bytes();

    let (destination, archive) = if let Some(path) = &args.archive {
        let path = expand_tilde(path)?;
        let tarball = archive_generated_code(code, &ArchiveOptions::default())?;
        fs::write(&path, tarball).with_context(|| format!("failed to write {}", path.display()))?;
        (path, true)
    } else {
        let dir = expand_tilde(args.output.as_deref().unwrap_or_else(|| Path::new(".")))?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        FilesBuilder::from_generated_code(code, "/").build_and_export(&dir)?;
        (dir, false)
    };

    info!("Wrote {} to {}", spec.name, destination.display());

    let report = GenerateReport {
        package: spec.name.to_string(),
        version: spec.version.to_string(),
        files,
        bytes,
        destination: display_path(&destination),
        archive,
    };
    println!("{}", format_output(&report, format)?);
    Ok(ExitCode::SUCCESS)
}

fn display_path(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
