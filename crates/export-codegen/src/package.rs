//! npm package assembly.
//!
//! Combines the manifest with the rendered modules into the file set of one
//! installable package. No generation logic lives here.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::{PackageAssembler, PackageSpec};
//! use rsocket_export_core::{PackageName, PackageVersion};
//!
//! let spec = PackageSpec::new(
//!     PackageName::new("@UserService/AccountService").unwrap(),
//!     PackageVersion::new("2024.01.31"),
//! );
//! let code = PackageAssembler::assemble(&spec, "AccountService", "// js", Some("// d.ts")).unwrap();
//!
//! let paths: Vec<_> = code.files().map(|f| f.path()).collect();
//! assert_eq!(
//!     paths,
//!     ["AccountService/package.json", "AccountService/index.js", "AccountService/index.d.ts"]
//! );
//! ```

use crate::common::{GeneratedCode, GeneratedFile};
use rsocket_export_core::{Error, PackageName, PackageVersion, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the runtime module.
pub const RUNTIME_MODULE: &str = "index.js";

/// File name of the declaration module.
pub const DECLARATION_MODULE: &str = "index.d.ts";

/// File name of the manifest.
pub const MANIFEST: &str = "package.json";

/// Wire-protocol client dependencies pinned by every generated package.
pub const DEPENDENCIES: &[(&str, &str)] = &[
    ("fbjs", "^1.0.0"),
    ("rsocket-core", "0.0.19"),
    ("rsocket-flowable", "^0.0.14"),
    ("rsocket-types", "^0.0.16"),
    ("rsocket-websocket-client", "0.0.19"),
    ("rxjs", "^6.5.4"),
];

/// Caller-supplied identity of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// npm package name
    pub name: PackageName,
    /// Date-stamped version
    pub version: PackageVersion,
    /// Free-text description
    pub description: String,
    /// Whether `index.d.ts` is produced
    pub emit_declarations: bool,
}

impl PackageSpec {
    /// Creates package settings with declarations enabled and a generic description.
    #[must_use]
    pub fn new(name: PackageName, version: PackageVersion) -> Self {
        let description = format!("npm package to call RSocket {}", name.short_name());
        Self {
            name,
            version,
            description,
            emit_declarations: true,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Enables or disables `index.d.ts`.
    #[must_use]
    pub const fn with_declarations(mut self, emit: bool) -> Self {
        self.emit_declarations = emit;
        self
    }
}

/// `package.json` contents, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// Runtime entry point
    pub main: String,
    /// Declaration entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    /// Description
    pub description: String,
    /// Dependencies with version ranges
    pub dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Builds the manifest for a package.
    #[must_use]
    pub fn for_spec(spec: &PackageSpec) -> Self {
        Self {
            name: spec.name.as_str().to_string(),
            version: spec.version.as_str().to_string(),
            main: RUNTIME_MODULE.to_string(),
            types: spec
                .emit_declarations
                .then(|| DECLARATION_MODULE.to_string()),
            description: spec.description.clone(),
            dependencies: DEPENDENCIES
                .iter()
                .map(|(name, range)| ((*name).to_string(), (*range).to_string()))
                .collect(),
        }
    }

    /// Serializes the manifest as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: "failed to serialize package.json".to_string(),
            source: Some(e),
        })?;
        json.push('\n');
        Ok(json)
    }
}

/// Combines manifest and modules into package files.
#[derive(Debug, Clone, Copy)]
pub struct PackageAssembler;

impl PackageAssembler {
    /// Assembles the files of one package under `directory`, the short name
    /// of the service.
    ///
    /// The declaration module is written only when it is supplied and the
    /// spec enables declarations.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if the manifest cannot be
    /// serialized.
    pub fn assemble(
        spec: &PackageSpec,
        directory: &str,
        runtime: &str,
        declaration: Option<&str>,
    ) -> Result<GeneratedCode> {
        let declaration = declaration.filter(|_| spec.emit_declarations);

        let manifest = PackageManifest {
            types: declaration.map(|_| DECLARATION_MODULE.to_string()),
            ..PackageManifest::for_spec(spec)
        };

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new(
            format!("{directory}/{MANIFEST}"),
            manifest.to_json()?,
        ));
        code.add_file(GeneratedFile::new(format!("{directory}/{RUNTIME_MODULE}"), runtime));
        if let Some(declaration) = declaration {
            code.add_file(GeneratedFile::new(
                format!("{directory}/{DECLARATION_MODULE}"),
                declaration,
            ));
        }

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> PackageSpec {
        PackageSpec::new(
            PackageName::new("@UserService/AccountService").unwrap(),
            PackageVersion::new("2024.03.09"),
        )
    }

    #[test]
    fn test_manifest_layout() {
        let json = PackageManifest::for_spec(&spec().with_description("demo"))
            .to_json()
            .unwrap();
        let expected = r#"{
  "name": "@UserService/AccountService",
  "version": "2024.03.09",
  "main": "index.js",
  "types": "index.d.ts",
  "description": "demo",
  "dependencies": {
    "fbjs": "^1.0.0",
    "rsocket-core": "0.0.19",
    "rsocket-flowable": "^0.0.14",
    "rsocket-types": "^0.0.16",
    "rsocket-websocket-client": "0.0.19",
    "rxjs": "^6.5.4"
  }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_description_is_json_escaped() {
        let json = PackageManifest::for_spec(&spec().with_description("say \"hi\""))
            .to_json()
            .unwrap();
        let parsed: PackageManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.description, "say \"hi\"");
    }

    #[test]
    fn test_without_declarations() {
        let spec = spec().with_declarations(false);
        let code = PackageAssembler::assemble(&spec, "AccountService", "js", Some("dts")).unwrap();
        assert_eq!(code.file_count(), 2);

        let manifest: PackageManifest =
            serde_json::from_str(code.find("AccountService/package.json").unwrap().content())
                .unwrap();
        assert!(manifest.types.is_none());
    }

    #[test]
    fn test_missing_declaration_drops_types_field() {
        let code = PackageAssembler::assemble(&spec(), "AccountService", "js", None).unwrap();
        let manifest = code.find("AccountService/package.json").unwrap().content();
        assert!(!manifest.contains("\"types\""));
    }

    #[test]
    fn test_unscoped_name_description() {
        let spec = PackageSpec::new(
            PackageName::new("account-service").unwrap(),
            PackageVersion::new("2024.03.09"),
        );
        assert_eq!(spec.description, "npm package to call RSocket account-service");
        assert!(spec.emit_declarations);
    }
}
