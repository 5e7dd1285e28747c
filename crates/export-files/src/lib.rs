//! Package file trees for generated npm packages.
//!
//! Holds the files of one or more generated packages in memory, in the order
//! they were generated, and exports them either to a directory on disk or as
//! a deterministic tar+gzip archive.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::{GeneratedCode, GeneratedFile};
//! use rsocket_export_files::{ArchiveOptions, FilesBuilder};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new("AccountService/package.json", "{}"));
//! code.add_file(GeneratedFile::new("AccountService/index.js", "// js"));
//!
//! let fs = FilesBuilder::from_generated_code(code, "/").build().unwrap();
//! assert!(fs.exists("/AccountService/package.json"));
//!
//! let tarball = fs.to_tar_gz(&ArchiveOptions::default()).unwrap();
//! assert!(!tarball.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod builder;
pub mod filesystem;
pub mod types;
pub mod vfs;

pub use archive::{ArchiveOptions, archive_generated_code};
pub use builder::{FilesBuilder, expand_tilde};
pub use filesystem::ExportOptions;
pub use types::{FileEntry, FilePath, FilesError, Result};
pub use vfs::FileSystem;
