//! Code generation for RSocket npm packages.
//!
//! Turns a [`ServiceContract`](rsocket_export_introspector::ServiceContract)
//! into `index.js` (runtime call dispatch), `index.d.ts` (static
//! declarations) and `package.json`, using Handlebars templates.
//!
//! Generation is a two-phase pipeline: a [`TypeRegistry`] pre-pass names
//! every record type, then both renderers read that registry so they always
//! agree on structural type names.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::{ExportGenerator, PackageSpec};
//! use rsocket_export_core::{PackageName, PackageVersion};
//! use rsocket_export_introspector::{Introspector, ServiceReflection};
//!
//! let doc = ServiceReflection::from_json_str(r#"{
//!     "type_name": "org.demo.AccountServiceImpl",
//!     "route": "org.demo.AccountService",
//!     "methods": [{"name": "count", "route": "direct", "returns": "Mono<Long>"}]
//! }"#).unwrap();
//! let contract = Introspector::new().introspect(&doc).unwrap();
//!
//! let spec = PackageSpec::new(
//!     PackageName::new("@demo/AccountService").unwrap(),
//!     PackageVersion::new("2024.01.31"),
//! );
//! let code = ExportGenerator::new().unwrap().generate(&contract, &spec).unwrap();
//! assert_eq!(code.file_count(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod generator;
pub mod package;
pub mod registry;
pub mod rsocket;
pub mod template_engine;
pub mod type_mapper;

pub use common::{GeneratedCode, GeneratedFile};
pub use generator::ExportGenerator;
pub use package::{PackageAssembler, PackageManifest, PackageSpec};
pub use registry::{StructuralProperty, StructuralTypeDef, TypeRegistry};
pub use rsocket::{DeclarationRenderer, StubRenderer};
pub use template_engine::TemplateEngine;
