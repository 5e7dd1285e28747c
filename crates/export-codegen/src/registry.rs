//! Structural type registry.
//!
//! The registry is filled in one pre-pass over the contract before any text
//! is rendered. Both renderers then read the same registry, so `index.js`
//! and `index.d.ts` always agree on definition names.
//!
//! Walk order is fixed. Custom parameter typedefs come first, since
//! parameters refer to them by their document name. Then methods in contract
//! order; within a method, the parameters left to right, then the return
//! type; every newly seen record is followed by its fields, depth first.
//! Record names are `<SimpleName>_<firstMethodName>`; a clash with any name
//! already taken appends `_2`, `_3`, ...

use rsocket_export_core::{RecordId, TypeDescriptor};
use rsocket_export_introspector::{CustomTypeDef, RecordCatalog, ServiceContract};
use tracing::debug;

/// One property of a structural type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralProperty {
    /// Property name
    pub name: String,
    /// Property type
    pub ty: TypeDescriptor,
}

/// Generated declaration for one record identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralTypeDef {
    /// Record identity this definition stands for
    pub id: RecordId,
    /// Definition name used in generated code
    pub name: String,
    /// Properties in field declaration order
    pub properties: Vec<StructuralProperty>,
}

/// Append-only, identity-keyed set of structural definitions.
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::TypeRegistry;
/// use rsocket_export_introspector::{Introspector, ServiceReflection};
///
/// let doc = ServiceReflection::from_json_str(r#"{
///     "type_name": "a.AccountServiceImpl",
///     "route": "a.AccountService",
///     "methods": [
///         {"name": "findById", "route": "direct", "params": [{"name": "id", "type": "int"}], "returns": "Mono<Account>"},
///         {"name": "findAll", "route": "direct", "returns": "Flux<Account>"}
///     ],
///     "records": [{"name": "a.Account", "fields": [{"name": "id", "type": "int"}]}]
/// }"#).unwrap();
/// let contract = Introspector::new().introspect(&doc).unwrap();
///
/// let registry = TypeRegistry::collect(&contract);
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.definitions().next().unwrap().name, "Account_findById");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    definitions: Vec<StructuralTypeDef>,
    custom: Vec<CustomTypeDef>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            definitions: Vec::new(),
            custom: Vec::new(),
        }
    }

    /// Builds the registry for a whole contract.
    #[must_use]
    pub fn collect(contract: &ServiceContract) -> Self {
        let mut registry = Self::new();

        for custom in contract
            .methods
            .iter()
            .flat_map(|m| &m.params)
            .filter_map(|p| p.typedef.as_ref())
        {
            registry.register_custom(custom);
        }

        for method in &contract.methods {
            for param in method.params.iter().filter(|p| p.typedef.is_none()) {
                registry.register(&param.ty, &method.name, &contract.records);
            }
            registry.register(&method.return_type, &method.name, &contract.records);
        }

        debug!(
            "Registered {} structural types and {} custom types for {}",
            registry.definitions.len(),
            registry.custom.len(),
            contract.route
        );

        registry
    }

    /// Registers every record reachable from `ty`.
    ///
    /// Already registered identities are left untouched.
    pub fn register(&mut self, ty: &TypeDescriptor, method: &str, catalog: &RecordCatalog) {
        match ty {
            TypeDescriptor::Record(id) => {
                if self.name_of(id).is_some() {
                    return;
                }

                let name = self.unique_name(&format!("{}_{method}", id.simple_name()));
                let fields = catalog.fields_of(id);
                self.definitions.push(StructuralTypeDef {
                    id: id.clone(),
                    name,
                    properties: fields
                        .iter()
                        .map(|f| StructuralProperty {
                            name: f.name.clone(),
                            ty: f.ty.clone(),
                        })
                        .collect(),
                });

                for field in fields {
                    self.register(&field.ty, method, catalog);
                }
            }
            TypeDescriptor::List(inner)
            | TypeDescriptor::Single(inner)
            | TypeDescriptor::Stream(inner) => self.register(inner, method, catalog),
            TypeDescriptor::Number(_)
            | TypeDescriptor::Boolean
            | TypeDescriptor::Text
            | TypeDescriptor::Void
            | TypeDescriptor::DateTime
            | TypeDescriptor::Binary => {}
        }
    }

    /// Registers a custom parameter type.
    ///
    /// The first definition of a name wins, and a name already used by a
    /// record definition is skipped so no name is declared twice.
    pub fn register_custom(&mut self, def: &CustomTypeDef) {
        if self.is_taken(&def.name) {
            debug!("Custom type {} already declared", def.name);
            return;
        }
        self.custom.push(def.clone());
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.is_taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn is_taken(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name) || self.custom.iter().any(|c| c.name == name)
    }

    /// Definition name for a record identity.
    #[must_use]
    pub fn name_of(&self, id: &RecordId) -> Option<&str> {
        self.definitions
            .iter()
            .find(|d| &d.id == id)
            .map(|d| d.name.as_str())
    }

    /// Record definitions in first-registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &StructuralTypeDef> {
        self.definitions.iter()
    }

    /// Custom parameter types in first-registration order.
    pub fn custom_types(&self) -> impl Iterator<Item = &CustomTypeDef> {
        self.custom.iter()
    }

    /// Number of record definitions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no record or custom type was registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.custom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsocket_export_introspector::{RecordDef, RecordField};

    fn catalog() -> RecordCatalog {
        RecordCatalog::new(vec![
            RecordDef {
                id: RecordId::new("a.Node"),
                fields: vec![
                    RecordField {
                        name: "value".to_string(),
                        ty: TypeDescriptor::Text,
                    },
                    RecordField {
                        name: "children".to_string(),
                        ty: TypeDescriptor::list(TypeDescriptor::record("a.Node")),
                    },
                    RecordField {
                        name: "owner".to_string(),
                        ty: TypeDescriptor::record("a.User"),
                    },
                ],
            },
            RecordDef {
                id: RecordId::new("a.User"),
                fields: vec![RecordField {
                    name: "nick".to_string(),
                    ty: TypeDescriptor::Text,
                }],
            },
        ])
    }

    #[test]
    fn test_recursive_records_terminate() {
        let mut registry = TypeRegistry::new();
        registry.register(&TypeDescriptor::record("a.Node"), "tree", &catalog());

        let names: Vec<_> = registry.definitions().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Node_tree", "User_tree"]);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut registry = TypeRegistry::new();
        let ty = TypeDescriptor::stream(TypeDescriptor::record("a.User"));
        registry.register(&ty, "first", &catalog());
        registry.register(&ty, "second", &catalog());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of(&RecordId::new("a.User")), Some("User_first"));
    }

    #[test]
    fn test_distinct_identities_with_same_simple_name() {
        let mut registry = TypeRegistry::new();
        let empty = RecordCatalog::default();
        registry.register(&TypeDescriptor::record("a.Account"), "find", &empty);
        registry.register(&TypeDescriptor::record("b.Account"), "find", &empty);
        registry.register(&TypeDescriptor::record("c.Account"), "find", &empty);

        let names: Vec<_> = registry.definitions().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Account_find", "Account_find_2", "Account_find_3"]);
    }

    #[test]
    fn test_unknown_record_has_no_properties() {
        let mut registry = TypeRegistry::new();
        registry.register(&TypeDescriptor::record("x.Mystery"), "m", &RecordCatalog::default());
        assert!(registry.definitions().next().unwrap().properties.is_empty());
    }

    #[test]
    fn test_primitives_register_nothing() {
        let mut registry = TypeRegistry::new();
        let ty = TypeDescriptor::single(TypeDescriptor::list(TypeDescriptor::Text));
        registry.register(&ty, "m", &RecordCatalog::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_custom_types_first_wins() {
        let mut registry = TypeRegistry::new();
        let first = CustomTypeDef {
            name: "Query".to_string(),
            properties: Vec::new(),
        };
        let mut second = first.clone();
        second.properties.push(rsocket_export_introspector::CustomProperty {
            name: "q".to_string(),
            js_type: "string".to_string(),
            description: None,
        });

        registry.register_custom(&first);
        registry.register_custom(&second);

        assert_eq!(registry.custom_types().count(), 1);
        assert!(registry.custom_types().next().unwrap().properties.is_empty());
    }

    #[test]
    fn test_custom_type_skipped_when_record_owns_name() {
        let mut registry = TypeRegistry::new();
        registry.register(&TypeDescriptor::record("a.User"), "a", &catalog());
        registry.register_custom(&CustomTypeDef {
            name: "User_a".to_string(),
            properties: Vec::new(),
        });

        assert_eq!(registry.custom_types().count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_records_yield_to_custom_type_names() {
        let doc = rsocket_export_introspector::ServiceReflection::from_json_str(
            r#"{"type_name":"a.AccountServiceImpl","route":"a.AccountService","methods":[
                {"name":"a","route":"direct","params":[{"name":"x","type":"Account"}],"returns":"Mono<Long>"},
                {"name":"b","route":"direct","returns":"Mono<Long>","params":[
                    {"name":"y","type":"Object","typedef":{"name":"Account_a","properties":[{"name":"id","type":"number"}]}}
                ]}
            ]}"#,
        )
        .unwrap();
        let contract = rsocket_export_introspector::Introspector::new()
            .introspect(&doc)
            .unwrap();

        let registry = TypeRegistry::collect(&contract);

        assert_eq!(registry.custom_types().next().unwrap().name, "Account_a");
        let names: Vec<_> = registry.definitions().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Account_a_2"]);
    }
}
