//! Contract introspection for RSocket services.
//!
//! Reads service reflection documents, resolves their type expressions into
//! the closed [`TypeDescriptor`](rsocket_export_core::TypeDescriptor) model,
//! and classifies every exported method into an interaction mode.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_core::InteractionMode;
//! use rsocket_export_introspector::{Introspector, ServiceReflection};
//!
//! let doc = ServiceReflection::from_json_str(r#"{
//!     "type_name": "org.demo.AccountServiceImpl",
//!     "route": "org.demo.AccountService",
//!     "methods": [
//!         {"name": "findAll", "route": "direct", "returns": "Flux<String>"}
//!     ]
//! }"#).unwrap();
//!
//! let contract = Introspector::new().introspect(&doc).unwrap();
//! assert_eq!(contract.methods[0].mode, InteractionMode::RequestStream);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod catalog;
pub mod classify;
pub mod discovery;
pub mod reflection;
pub mod type_expr;
pub mod types;

pub use catalog::ServiceCatalog;
pub use classify::{Classification, classify};
pub use discovery::Introspector;
pub use reflection::{
    CustomPropertyDoc, CustomTypeDoc, FieldDoc, MethodDoc, ParamDoc, RecordDoc, RouteMarker,
    ServiceReflection,
};
pub use type_expr::{TypeExpr, TypeResolver};
pub use types::{
    CustomProperty, CustomTypeDef, MethodDescriptor, ParameterDescriptor, RecordCatalog,
    RecordDef, RecordField, ServiceContract,
};
