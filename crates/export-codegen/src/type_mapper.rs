//! Type mapping from contract descriptors to JavaScript and TypeScript.
//!
//! Two separate vocabularies are produced:
//!
//! - the *runtime* name, as used in JSDoc annotations of `index.js`;
//! - the *static* name, as used in `index.d.ts`.
//!
//! Every numeric width maps to `number`. The distinction between 32- and
//! 64-bit or integer and floating values is lost on purpose.
//!
//! Record names come from the [`TypeRegistry`]; a record the registry has
//! never seen falls back to `Object` (runtime) or `any` (static).
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::TypeRegistry;
//! use rsocket_export_codegen::type_mapper::{runtime_type, static_type};
//! use rsocket_export_core::{NumericKind, TypeDescriptor};
//!
//! let registry = TypeRegistry::new();
//! let ty = TypeDescriptor::list(TypeDescriptor::Number(NumericKind::Long));
//!
//! assert_eq!(runtime_type(&ty, &registry), "Array");
//! assert_eq!(static_type(&ty, &registry), "number[]");
//! ```

use crate::common::typescript::parenthesize_union;
use crate::registry::TypeRegistry;
use rsocket_export_core::TypeDescriptor;

/// JSDoc name for a descriptor.
#[must_use]
pub fn runtime_type(ty: &TypeDescriptor, registry: &TypeRegistry) -> String {
    match ty {
        TypeDescriptor::Number(_) => "number".to_string(),
        TypeDescriptor::Boolean => "boolean".to_string(),
        TypeDescriptor::Text => "string".to_string(),
        TypeDescriptor::Void => "undefined".to_string(),
        TypeDescriptor::DateTime => "Date".to_string(),
        TypeDescriptor::Binary => "Buffer".to_string(),
        TypeDescriptor::List(_) => "Array".to_string(),
        TypeDescriptor::Single(inner) => runtime_type(inner, registry),
        TypeDescriptor::Stream(_) => "Array|Observable|Flowable".to_string(),
        TypeDescriptor::Record(id) => registry.name_of(id).unwrap_or("Object").to_string(),
    }
}

/// TypeScript name for a descriptor.
#[must_use]
pub fn static_type(ty: &TypeDescriptor, registry: &TypeRegistry) -> String {
    match ty {
        TypeDescriptor::Number(_) => "number".to_string(),
        TypeDescriptor::Boolean => "boolean".to_string(),
        TypeDescriptor::Text => "string".to_string(),
        TypeDescriptor::Void => "void".to_string(),
        TypeDescriptor::DateTime => "Date".to_string(),
        TypeDescriptor::Binary => "Buffer".to_string(),
        TypeDescriptor::List(inner) => {
            format!("{}[]", parenthesize_union(&static_type(inner, registry)))
        }
        TypeDescriptor::Single(inner) => static_type(inner, registry),
        TypeDescriptor::Stream(inner) => {
            let element = static_type(inner, registry);
            format!(
                "{}[] | Observable<{element}> | Flowable<{element}>",
                parenthesize_union(&element)
            )
        }
        TypeDescriptor::Record(id) => registry.name_of(id).unwrap_or("any").to_string(),
    }
}

/// Returns `true` if the descriptor needs a generated structural declaration.
#[must_use]
pub const fn is_structural(ty: &TypeDescriptor) -> bool {
    matches!(ty, TypeDescriptor::Record(_))
}
