//! Resolved contract types.

use rsocket_export_core::{
    InteractionMode, MethodOrdering, PackageName, RecordId, RouteName, TypeDescriptor,
};
use serde::{Deserialize, Serialize};

/// Immutable, fully resolved contract of one service.
///
/// # Examples
///
/// ```
/// use rsocket_export_introspector::{Introspector, ServiceReflection};
///
/// let doc = ServiceReflection::from_json_str(r#"{
///     "type_name": "org.demo.AccountServiceImpl",
///     "route": "org.demo.AccountService"
/// }"#).unwrap();
///
/// let contract = Introspector::new().introspect(&doc).unwrap();
/// assert_eq!(contract.class_name(), "AccountService");
/// assert_eq!(contract.short_name(), "AccountService");
/// assert!(contract.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContract {
    /// Class-level route.
    pub route: RouteName,
    /// Fully qualified implementation type.
    pub type_name: String,
    /// npm package advertised for this service, if any.
    pub npm_package: Option<PackageName>,
    /// Ordering applied to `methods`.
    pub ordering: MethodOrdering,
    /// Exported methods.
    pub methods: Vec<MethodDescriptor>,
    /// Record types known to this contract.
    pub records: RecordCatalog,
}

impl ServiceContract {
    /// Final dotted segment of the route.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.route.short_name()
    }

    /// Name of the generated client class: the implementation's simple name
    /// with a trailing `Impl` removed.
    #[must_use]
    pub fn class_name(&self) -> String {
        let simple = self
            .type_name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.type_name);
        match simple.strip_suffix("Impl") {
            Some(stripped) if !stripped.is_empty() => stripped.to_string(),
            _ => simple.to_string(),
        }
    }

    /// Returns `true` if no method is exported.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Looks up an exported method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// One exported method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<ParameterDescriptor>,
    /// Declared return type, fully nested.
    pub return_type: TypeDescriptor,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether the result may be `null`.
    pub result_nullable: bool,
    /// Resolved interaction mode.
    pub mode: InteractionMode,
    /// Channel whose return is a single value. Informational only.
    pub single_result_channel: bool,
    /// Innermost return type after unwrapping at most two generic levels.
    pub payload: TypeDescriptor,
}

impl MethodDescriptor {
    /// Parameter that carries the outbound sequence of a channel.
    #[must_use]
    pub fn channel_stream_param(&self) -> Option<&ParameterDescriptor> {
        if self.mode == InteractionMode::RequestChannel {
            self.params.last()
        } else {
            None
        }
    }
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name as declared.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Whether the caller must supply the value.
    pub required: bool,
    /// Default value text for optional parameters.
    pub default_value: Option<String>,
    /// Inline structural type documenting this parameter.
    pub typedef: Option<CustomTypeDef>,
}

/// Named inline type supplied with a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTypeDef {
    /// Type name.
    pub name: String,
    /// Properties in declaration order.
    pub properties: Vec<CustomProperty>,
}

/// One property of a [`CustomTypeDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProperty {
    /// Property name.
    pub name: String,
    /// JavaScript type text.
    pub js_type: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Record types and their fields, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCatalog {
    records: Vec<RecordDef>,
}

impl RecordCatalog {
    /// Creates a catalog from resolved records.
    #[must_use]
    pub const fn new(records: Vec<RecordDef>) -> Self {
        Self { records }
    }

    /// Looks up a record by identity.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&RecordDef> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Declared fields of a record. Unknown records have no fields.
    #[must_use]
    pub fn fields_of(&self, id: &RecordId) -> &[RecordField] {
        self.get(id).map_or(&[][..], |r| r.fields.as_slice())
    }

    /// Iterates over all records.
    pub fn iter(&self) -> impl Iterator<Item = &RecordDef> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDef {
    /// Record identity.
    pub id: RecordId,
    /// Fields in declaration order.
    pub fields: Vec<RecordField>,
}

/// One record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    /// Field name.
    pub name: String,
    /// Resolved field type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}
