//! Inspect command implementation.
//!
//! Shows how a reflection document resolves: which methods are exported,
//! how each is classified, and the payload types that go over the wire.

use crate::formatters::{Report, field, format_output, heading};
use anyhow::{Context, Result};
use colored::Colorize;
use rsocket_export_core::cli::{ExitCode, OutputFormat};
use rsocket_export_core::{InteractionMode, MethodOrdering};
use rsocket_export_introspector::{Introspector, ServiceContract, ServiceReflection};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

/// Resolved view of one service.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    /// Full route of the service
    pub route: String,
    /// Implementation type
    pub implementation: String,
    /// Advertised npm package, if any
    pub npm_package: Option<String>,
    /// Exported methods in generation order
    pub methods: Vec<MethodReport>,
    /// Number of record types in the document
    pub record_count: usize,
}

/// One exported method.
#[derive(Debug, Serialize)]
pub struct MethodReport {
    /// Method name
    pub name: String,
    /// Full route, `<service route>.<method>`
    pub route: String,
    /// Interaction mode
    pub mode: InteractionMode,
    /// `name: type` per parameter
    pub params: Vec<String>,
    /// Declared return type
    pub returns: String,
    /// Payload type carried on the wire
    pub payload: String,
    /// Marked deprecated
    pub deprecated: bool,
}

impl InspectReport {
    /// Builds the report for a contract.
    #[must_use]
    pub fn from_contract(contract: &ServiceContract) -> Self {
        Self {
            route: contract.route.as_str().to_string(),
            implementation: contract.type_name.clone(),
            npm_package: contract.npm_package.as_ref().map(ToString::to_string),
            methods: contract
                .methods
                .iter()
                .map(|m| MethodReport {
                    name: m.name.clone(),
                    route: contract.route.method_route(&m.name),
                    mode: m.mode,
                    params: m
                        .params
                        .iter()
                        .map(|p| {
                            let marker = if p.required { "" } else { "?" };
                            format!("{}{marker}: {}", p.name, p.ty)
                        })
                        .collect(),
                    returns: m.return_type.to_string(),
                    payload: m.payload.to_string(),
                    deprecated: m.deprecated,
                })
                .collect(),
            record_count: contract.records.len(),
        }
    }
}

impl Report for InspectReport {
    fn pretty(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", heading(&self.route));
        let _ = writeln!(out, "{}", field("implements", &self.implementation));
        let _ = writeln!(
            out,
            "{}",
            field("package", self.npm_package.as_deref().unwrap_or("-"))
        );
        let _ = writeln!(out, "{}", field("records", self.record_count));
        let _ = writeln!(out);

        if self.methods.is_empty() {
            let _ = writeln!(out, "{}", "No exported methods".yellow());
            return out;
        }

        for method in &self.methods {
            let name = if method.deprecated {
                method.name.strikethrough().to_string()
            } else {
                method.name.bold().to_string()
            };
            let _ = writeln!(
                out,
                "{} {}({}) -> {}",
                format!("{:<17}", method.mode.as_str()).cyan(),
                name,
                method.params.join(", "),
                method.returns.green()
            );
        }
        out
    }
}

/// Runs the inspect command.
///
/// # Errors
///
/// Returns an error if the document cannot be read or does not describe an
/// RSocket service.
pub fn run(document: &Path, ordering: MethodOrdering, format: OutputFormat) -> Result<ExitCode> {
    info!("Inspecting {}", document.display());

    let doc = ServiceReflection::from_path(document)
        .with_context(|| format!("failed to read {}", document.display()))?;
    let contract = Introspector::with_ordering(ordering)
        .introspect(&doc)
        .with_context(|| format!("failed to introspect {}", doc.type_name))?;

    let report = InspectReport::from_contract(&contract);
    println!("{}", format_output(&report, format)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ServiceContract {
        let doc = ServiceReflection::from_json_str(
            r#"{
                "type_name": "org.demo.AccountServiceImpl",
                "route": "org.demo.AccountService",
                "methods": [
                    {"name": "findById", "route": "direct",
                     "params": [{"name": "id", "type": "Integer"}], "returns": "Mono<String>"},
                    {"name": "touch", "route": "direct", "deprecated": true,
                     "params": [{"name": "id", "type": "Integer", "required": false}]}
                ]
            }"#,
        )
        .unwrap();
        Introspector::new().introspect(&doc).unwrap()
    }

    #[test]
    fn test_report_methods() {
        let report = InspectReport::from_contract(&contract());

        assert_eq!(report.route, "org.demo.AccountService");
        assert_eq!(report.methods.len(), 2);
        assert_eq!(report.methods[0].route, "org.demo.AccountService.findById");
        assert_eq!(report.methods[0].mode, InteractionMode::RequestResponse);
        assert_eq!(report.methods[1].mode, InteractionMode::FireAndForget);
        assert!(report.methods[1].params[0].starts_with("id?: "));
        assert!(report.methods[1].deprecated);
    }

    #[test]
    fn test_report_json() {
        let report = InspectReport::from_contract(&contract());
        let json: serde_json::Value =
            serde_json::from_str(&format_output(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["methods"][0]["mode"], "request_response");
        assert_eq!(json["npm_package"], serde_json::Value::Null);
    }

    #[test]
    fn test_pretty_lists_methods() {
        colored::control::set_override(false);
        let out = InspectReport::from_contract(&contract()).pretty();
        assert!(out.starts_with("org.demo.AccountService\n"));
        assert!(out.contains("request_response  findById(id: "));
        assert!(out.contains("fire_and_forget   touch(id?: "));
    }

    #[test]
    fn test_missing_document() {
        let err = run(
            Path::new("/nonexistent/account.json"),
            MethodOrdering::Declaration,
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
