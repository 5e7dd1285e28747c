//! Core types, configuration, and errors for RSocket npm export.
//!
//! This crate provides the foundational types shared by the introspector,
//! the code generators, the package file tree, and the binaries.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`RouteName`, `PackageName`, `PackageVersion`)
//! - The closed type model of a reflected contract (`TypeDescriptor`)
//! - The four RSocket interaction modes (`InteractionMode`)
//! - Error hierarchy with contextual information
//! - Configuration loaded from TOML

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod descriptor;
mod error;
mod mode;
mod types;

pub use config::{ExportConfig, MethodOrdering};
pub use descriptor::{NumericKind, RecordId, TypeDescriptor};
pub use error::{Error, Result};
pub use mode::InteractionMode;
pub use types::{PackageName, PackageVersion, RouteName};
