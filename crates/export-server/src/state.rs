//! Shared, read-only state of the export server.
//!
//! Built once at startup and shared behind an `Arc`; every request
//! generates from scratch against it.

use crate::error::ExportError;
use rsocket_export_codegen::{ExportGenerator, PackageSpec};
use rsocket_export_core::{ExportConfig, PackageName, PackageVersion};
use rsocket_export_files::{ArchiveOptions, archive_generated_code};
use rsocket_export_introspector::ServiceCatalog;
use std::fmt::Write;
use tracing::info;

/// Package used in the usage section when the catalog advertises none.
const SAMPLE_PACKAGE: &str = "@UserService/AccountService";

/// Catalog, settings and templates of one server process.
#[derive(Debug)]
pub struct ExportState {
    catalog: ServiceCatalog,
    config: ExportConfig,
    generator: ExportGenerator,
}

impl ExportState {
    /// Creates the state, parsing the built-in templates once.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Generation`] if a template fails to parse.
    pub fn new(catalog: ServiceCatalog, config: ExportConfig) -> Result<Self, ExportError> {
        Ok(Self {
            catalog,
            config,
            generator: ExportGenerator::new()?,
        })
    }

    /// Services known to this server.
    #[must_use]
    pub const fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Builds the tarball for a requested package path.
    ///
    /// A leading `/` is ignored. The last path segment is the service short
    /// name, matched against the final dotted segment of each route; the
    /// whole path becomes the package name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] if no service matches or the match
    /// has no callable methods, [`ExportError::InvalidPackageName`] if the
    /// path is not a valid npm name, and a generation or archive error if
    /// producing the package fails.
    pub fn export_package(
        &self,
        package_path: &str,
        version: PackageVersion,
    ) -> Result<Vec<u8>, ExportError> {
        let package = package_path.strip_prefix('/').unwrap_or(package_path);
        let short = package.rsplit('/').next().unwrap_or(package);

        let contract = self
            .catalog
            .find_by_short_name(short)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ExportError::NotFound {
                package: package.to_string(),
            })?;

        let name = PackageName::new(package).map_err(|source| ExportError::InvalidPackageName {
            package: package.to_string(),
            source,
        })?;

        let spec = PackageSpec::new(name, version)
            .with_description(format!(
                "npm package to call RSocket {short} from {} App",
                self.config.application_name
            ))
            .with_declarations(self.config.emit_declarations);

        let code = self.generator.generate(contract, &spec)?;
        let bytes = archive_generated_code(code, &ArchiveOptions::default())?;

        info!(
            "Exported {} {} for {} ({} bytes)",
            spec.name,
            spec.version,
            contract.route,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Markdown listing of every advertised package as `package.json`
    /// dependency lines pointing at this server, followed by usage notes.
    #[must_use]
    pub fn package_listing(&self) -> String {
        let base_url = self.config.public_base_url();
        let packages: Vec<_> = self.catalog.packages().map(|(name, _)| name).collect();

        let mut out = String::from("# NPM Packages\n\n```json\n\"dependencies\": {\n");
        let lines: Vec<_> = packages
            .iter()
            .map(|name| format!("  \"{name}\": \"{base_url}/npm/{name}\""))
            .collect();
        if !lines.is_empty() {
            out.push_str(&lines.join(",\n"));
            out.push('\n');
        }
        out.push_str("}\n```\n\n");

        let sample = packages.first().map_or(SAMPLE_PACKAGE, |name| name.as_str());
        let short = sample.rsplit('/').next().unwrap_or(sample);
        let variable = lower_first(short);

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "# How to use?\n\
             \n\
             * Include the dependency in your package.json and run \"yarn install\"\n\
             \n\
             ```\n\
             \"dependencies\": {{\n  \"{sample}\": \"{base_url}/npm/{sample}\"\n}}\n\
             ```\n\
             \n\
             * Call the service from your JS code:\n\
             \n\
             ```\n\
             const promiseRSocket = require(\"./rsocketClient\").connect(\"ws://localhost:8080/rsocket\");\n\
             const {variable} = require(\"{sample}\");\n\
             {variable}.setPromiseRSocket(promiseRSocket);\n\
             ```\n"
        );
        out
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
