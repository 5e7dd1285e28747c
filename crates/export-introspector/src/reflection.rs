//! Service reflection documents.
//!
//! A reflection document is what a reflective host hands over about one
//! service implementation: its identity, its class-level route, its public
//! methods in declaration order, and the record types those methods use.
//! Type expressions are kept as raw text here and resolved by the
//! [`Introspector`](crate::Introspector).
//!
//! Documents are JSON or TOML. The format is chosen from the file extension.

use rsocket_export_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// How a method acquired its route marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMarker {
    /// Declared on the method itself.
    Direct,
    /// Inherited from an interface or superclass declaration.
    Inherited,
}

/// Reflected view of one service implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReflection {
    /// Fully qualified implementation type, e.g. `org.demo.AccountServiceImpl`.
    pub type_name: String,

    /// Class-level route. Services without one cannot be exported.
    #[serde(default)]
    pub route: Option<String>,

    /// npm package name advertised in the package listing.
    #[serde(default)]
    pub npm_package: Option<String>,

    /// Public methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDoc>,

    /// Record types referenced by the methods.
    #[serde(default)]
    pub records: Vec<RecordDoc>,
}

/// One public method of the service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDoc {
    /// Method name.
    pub name: String,

    /// Route marker; methods without one are not exported.
    #[serde(default)]
    pub route: Option<RouteMarker>,

    /// Deprecation flag.
    #[serde(default)]
    pub deprecated: bool,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the result may be `null`.
    #[serde(default)]
    pub result_nullable: bool,

    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParamDoc>,

    /// Generic return type expression. Absent means `void`.
    #[serde(default = "void_expression")]
    pub returns: String,
}

fn void_expression() -> String {
    "void".to_string()
}

const fn default_required() -> bool {
    true
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    /// Parameter name.
    pub name: String,

    /// Type expression.
    #[serde(rename = "type")]
    pub type_expr: String,

    /// Whether the caller must supply the value.
    #[serde(default = "default_required")]
    pub required: bool,

    /// Default value text for optional parameters.
    #[serde(default)]
    pub default_value: Option<String>,

    /// Inline structural type that documents this parameter.
    #[serde(default)]
    pub typedef: Option<CustomTypeDoc>,
}

/// Named inline type attached to a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTypeDoc {
    /// Type name as it appears in generated code.
    pub name: String,

    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<CustomPropertyDoc>,
}

/// One property of a custom type, typed in JavaScript terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPropertyDoc {
    /// Property name.
    pub name: String,

    /// JavaScript type text, e.g. `string` or `number[]`.
    #[serde(rename = "type")]
    pub js_type: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A record type and its declared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDoc {
    /// Fully qualified record identity.
    pub name: String,

    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDoc>,
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDoc {
    /// Field name.
    pub name: String,

    /// Type expression.
    #[serde(rename = "type")]
    pub type_expr: String,
}

impl ServiceReflection {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if the text is not a valid document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::SerializationError {
            message: format!("invalid reflection document: {e}"),
            source: Some(e),
        })
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if the text is not a valid document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::SerializationError {
            message: format!("invalid reflection document: {e}"),
            source: None,
        })
    }

    /// Reads a document from disk. `.toml` files are parsed as TOML, all
    /// others as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or a serialization
    /// error if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Parsing reflection document {}", path.display());

        if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Simple name of the implementation type.
    #[must_use]
    pub fn simple_type_name(&self) -> &str {
        self.type_name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.type_name)
    }
}

/// Returns `true` if `path` names a document this crate can read.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("toml"))
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
