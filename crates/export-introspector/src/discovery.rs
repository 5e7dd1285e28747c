//! Contract introspection.
//!
//! Turns a [`ServiceReflection`] into an immutable [`ServiceContract`]:
//! filters methods by route marker, resolves every type expression once,
//! classifies each method, and applies an explicit method ordering.

use crate::classify::classify;
use crate::reflection::{MethodDoc, ParamDoc, ServiceReflection};
use crate::type_expr::TypeResolver;
use crate::types::{
    CustomProperty, CustomTypeDef, MethodDescriptor, ParameterDescriptor, RecordCatalog,
    RecordDef, RecordField, ServiceContract,
};
use rsocket_export_core::{
    Error, MethodOrdering, PackageName, RecordId, Result, RouteName, TypeDescriptor,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Builds service contracts from reflection documents.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::MethodOrdering;
/// use rsocket_export_introspector::{Introspector, ServiceReflection};
///
/// let doc = ServiceReflection::from_json_str(r#"{
///     "type_name": "org.demo.AccountServiceImpl",
///     "route": "org.demo.AccountService",
///     "methods": [
///         {"name": "save", "route": "direct", "params": [{"name": "nick", "type": "String"}]},
///         {"name": "count", "route": "direct", "returns": "Mono<Long>"},
///         {"name": "helper"}
///     ]
/// }"#).unwrap();
///
/// let contract = Introspector::with_ordering(MethodOrdering::Alphabetical)
///     .introspect(&doc)
///     .unwrap();
/// let names: Vec<_> = contract.methods.iter().map(|m| m.name.as_str()).collect();
/// assert_eq!(names, ["count", "save"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Introspector {
    ordering: MethodOrdering,
}

impl Introspector {
    /// Creates an introspector that keeps declaration order.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ordering: MethodOrdering::Declaration,
        }
    }

    /// Creates an introspector with an explicit method ordering.
    #[must_use]
    pub const fn with_ordering(ordering: MethodOrdering) -> Self {
        Self { ordering }
    }

    /// Ordering applied to exported methods.
    #[must_use]
    pub const fn ordering(&self) -> MethodOrdering {
        self.ordering
    }

    /// Resolves a reflection document into a contract.
    ///
    /// A document with no routed methods yields an empty contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidContract` if the service has no class-level
    /// route or declares an invalid npm package name, and
    /// `Error::InvalidTypeExpression` if any type expression is malformed.
    pub fn introspect(&self, doc: &ServiceReflection) -> Result<ServiceContract> {
        let route = doc
            .route
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| Error::InvalidContract {
                service: doc.type_name.clone(),
                reason: "missing class-level route".to_string(),
            })?;

        let npm_package = doc
            .npm_package
            .as_deref()
            .map(PackageName::new)
            .transpose()
            .map_err(|e| Error::InvalidContract {
                service: doc.type_name.clone(),
                reason: e.to_string(),
            })?;

        let resolver = TypeResolver::new(doc.records.iter().map(|r| RecordId::new(&r.name)));
        let records = resolve_records(doc, &resolver)?;

        let mut methods = Vec::new();
        let mut seen = HashSet::new();
        for method in doc.methods.iter().filter(|m| m.route.is_some()) {
            if !seen.insert(method.name.as_str()) {
                warn!(
                    "Service {} exports '{}' more than once; the last declaration wins in JavaScript",
                    doc.type_name, method.name
                );
            }
            methods.push(describe_method(method, &resolver)?);
        }

        if self.ordering == MethodOrdering::Alphabetical {
            methods.sort_by(|a, b| a.name.cmp(&b.name));
        }

        info!(
            "Introspected {} ({} methods, {} records)",
            route,
            methods.len(),
            records.len()
        );

        Ok(ServiceContract {
            route: RouteName::new(route),
            type_name: doc.type_name.clone(),
            npm_package,
            ordering: self.ordering,
            methods,
            records,
        })
    }
}

fn resolve_records(doc: &ServiceReflection, resolver: &TypeResolver) -> Result<RecordCatalog> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(doc.records.len());

    for record in &doc.records {
        if !seen.insert(record.name.as_str()) {
            warn!("Duplicate record '{}' ignored", record.name);
            continue;
        }

        let fields = record
            .fields
            .iter()
            .map(|field| {
                Ok(RecordField {
                    name: field.name.clone(),
                    ty: resolver.resolve_str(&field.type_expr)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        records.push(RecordDef {
            id: RecordId::new(&record.name),
            fields,
        });
    }

    Ok(RecordCatalog::new(records))
}

fn describe_method(method: &MethodDoc, resolver: &TypeResolver) -> Result<MethodDescriptor> {
    let params = method
        .params
        .iter()
        .map(|param| describe_param(param, resolver))
        .collect::<Result<Vec<_>>>()?;

    let return_type = resolver.resolve_str(&method.returns)?;

    let param_types: Vec<&TypeDescriptor> = params.iter().map(|p| &p.ty).collect();
    let classification = classify(&param_types, &return_type);
    let payload = return_type.inferred_payload().clone();

    debug!(
        "Method {} classified as {} (payload {})",
        method.name, classification.mode, payload
    );

    Ok(MethodDescriptor {
        name: method.name.clone(),
        params,
        return_type,
        deprecated: method.deprecated,
        description: method
            .description
            .as_ref()
            .filter(|d| !d.trim().is_empty())
            .cloned(),
        result_nullable: method.result_nullable,
        mode: classification.mode,
        single_result_channel: classification.single_result_channel,
        payload,
    })
}

fn describe_param(param: &ParamDoc, resolver: &TypeResolver) -> Result<ParameterDescriptor> {
    Ok(ParameterDescriptor {
        name: param.name.clone(),
        ty: resolver.resolve_str(&param.type_expr)?,
        required: param.required,
        default_value: param.default_value.clone(),
        typedef: param.typedef.as_ref().map(|doc| CustomTypeDef {
            name: doc.name.clone(),
            properties: doc
                .properties
                .iter()
                .map(|p| CustomProperty {
                    name: p.name.clone(),
                    js_type: p.js_type.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        }),
    })
}
