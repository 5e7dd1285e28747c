//! End-to-end package generation.
//!
//! One call to [`ExportGenerator::generate`] is one generation request:
//! a fresh [`TypeRegistry`] pre-pass over the contract, both renders reading
//! that registry, then assembly. Nothing is shared across requests except
//! the parsed templates.

use crate::common::GeneratedCode;
use crate::package::{PackageAssembler, PackageSpec};
use crate::registry::TypeRegistry;
use crate::rsocket::{DeclarationRenderer, StubRenderer};
use crate::template_engine::TemplateEngine;
use rsocket_export_core::Result;
use rsocket_export_introspector::ServiceContract;
use tracing::{debug, info};

/// Generates npm packages from service contracts.
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::{ExportGenerator, PackageSpec};
/// use rsocket_export_core::{PackageName, PackageVersion};
/// use rsocket_export_introspector::{Introspector, ServiceReflection};
///
/// let doc = ServiceReflection::from_json_str(r#"{
///     "type_name": "org.demo.AccountServiceImpl",
///     "route": "org.demo.AccountService",
///     "methods": [{"name": "count", "route": "direct", "returns": "Mono<Long>"}]
/// }"#).unwrap();
/// let contract = Introspector::new().introspect(&doc).unwrap();
///
/// let generator = ExportGenerator::new().unwrap();
/// let spec = PackageSpec::new(
///     PackageName::new("@demo/AccountService").unwrap(),
///     PackageVersion::new("2024.01.31"),
/// )
/// .with_declarations(false);
///
/// let code = generator.generate(&contract, &spec).unwrap();
/// assert_eq!(code.file_count(), 2);
/// assert!(code.find("AccountService/index.js").unwrap().content().contains("count()"));
/// ```
#[derive(Debug)]
pub struct ExportGenerator {
    engine: TemplateEngine,
}

impl ExportGenerator {
    /// Creates a generator with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Renders `index.js` alone.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if rendering fails.
    pub fn render_runtime(&self, contract: &ServiceContract) -> Result<String> {
        let registry = TypeRegistry::collect(contract);
        StubRenderer::new(&self.engine).render(contract, &registry)
    }

    /// Renders `index.d.ts` alone.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if rendering fails.
    pub fn render_declarations(&self, contract: &ServiceContract) -> Result<String> {
        let registry = TypeRegistry::collect(contract);
        DeclarationRenderer::new(&self.engine).render(contract, &registry)
    }

    /// Generates every file of the package for `contract`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if rendering fails or
    /// `Error::SerializationError` if the manifest cannot be written.
    pub fn generate(&self, contract: &ServiceContract, spec: &PackageSpec) -> Result<GeneratedCode> {
        let registry = TypeRegistry::collect(contract);
        debug!(
            "Type registry for {}: {} structural types",
            contract.route,
            registry.len()
        );

        let runtime = StubRenderer::new(&self.engine).render(contract, &registry)?;
        let declaration = if spec.emit_declarations {
            Some(DeclarationRenderer::new(&self.engine).render(contract, &registry)?)
        } else {
            None
        };

        let code = PackageAssembler::assemble(
            spec,
            contract.short_name(),
            &runtime,
            declaration.as_deref(),
        )?;

        info!(
            "Generated {} {} ({} files, {} bytes)",
            spec.name,
            spec.version,
            code.file_count(),
            code.total_bytes()
        );
        Ok(code)
    }
}
