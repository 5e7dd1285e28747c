//! tar+gzip packaging of a file tree.
//!
//! Entries appear in tree order with fixed ownership, mode and timestamp, so
//! the same tree always produces the same bytes.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_files::{ArchiveOptions, FilesBuilder};
//!
//! let fs = FilesBuilder::new()
//!     .add_file("/AccountService/package.json", "{}")
//!     .build()
//!     .unwrap();
//!
//! let first = fs.to_tar_gz(&ArchiveOptions::default()).unwrap();
//! let second = fs.to_tar_gz(&ArchiveOptions::default()).unwrap();
//! assert_eq!(first, second);
//! ```

use crate::builder::FilesBuilder;
use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use flate2::Compression;
use flate2::write::GzEncoder;
use rsocket_export_codegen::GeneratedCode;
use std::io::Write;
use tar::{EntryType, Header};
use tracing::debug;

/// Header values stamped on every archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Modification time, seconds since the epoch
    pub mtime: u64,
    /// Unix permission bits
    pub mode: u32,
    /// gzip level 0-9
    pub level: u32,
}

impl ArchiveOptions {
    /// Epoch timestamp, mode `0644`, default compression.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mtime: 0,
            mode: 0o644,
            level: 6,
        }
    }

    /// Sets the entry timestamp.
    #[must_use]
    pub const fn with_mtime(mut self, mtime: u64) -> Self {
        self.mtime = mtime;
        self
    }

    /// Sets the gzip level, clamped to 9.
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.min(9);
        self
    }
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    /// Packs the tree into a gzip-compressed tar archive.
    ///
    /// Entry names are tree paths without the leading `/`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::ArchiveError`] if an entry cannot be written.
    pub fn to_tar_gz(&self, options: &ArchiveOptions) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.total_bytes() / 2 + 1024);
        self.write_tar_gz(&mut buffer, options)?;
        Ok(buffer)
    }

    /// Streams the archive into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::ArchiveError`] if an entry or the stream
    /// trailer cannot be written.
    pub fn write_tar_gz<W: Write>(&self, writer: W, options: &ArchiveOptions) -> Result<()> {
        let encoder = GzEncoder::new(writer, Compression::new(options.level));
        let mut tar = tar::Builder::new(encoder);

        for (path, entry) in self.files() {
            let name = path.archive_name();
            let data = entry.content().as_bytes();

            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_size(data.len() as u64);
            header.set_mode(options.mode);
            header.set_mtime(options.mtime);
            header.set_uid(0);
            header.set_gid(0);

            tar.append_data(&mut header, name, data)
                .map_err(|source| FilesError::ArchiveError {
                    entry: name.to_string(),
                    source,
                })?;
            debug!("Archived {} ({} bytes)", name, data.len());
        }

        let archive_error = |source| FilesError::ArchiveError {
            entry: "<archive>".to_string(),
            source,
        };
        tar.into_inner()
            .map_err(archive_error)?
            .finish()
            .map_err(archive_error)?;
        Ok(())
    }
}

/// Packs generated package files into a tar+gzip archive.
///
/// # Errors
///
/// Returns a path error if a generated path is not relative and clean, or an
/// archive error if writing fails.
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::{GeneratedCode, GeneratedFile};
/// use rsocket_export_files::{ArchiveOptions, archive_generated_code};
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile::new("AccountService/index.js", "// js"));
///
/// let bytes = archive_generated_code(code, &ArchiveOptions::default()).unwrap();
/// assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
/// ```
pub fn archive_generated_code(code: GeneratedCode, options: &ArchiveOptions) -> Result<Vec<u8>> {
    FilesBuilder::from_generated_code(code, "/")
        .build()?
        .to_tar_gz(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn package() -> FileSystem {
        FilesBuilder::new()
            .add_file("/AccountService/package.json", "{}")
            .add_file("/AccountService/index.js", "module.exports = {};")
            .build()
            .unwrap()
    }

    fn entries(bytes: &[u8]) -> Vec<(String, u32, u64, String)> {
        let mut archive = tar::Archive::new(GzDecoder::new(bytes));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let name = entry.path().unwrap().to_string_lossy().into_owned();
                let mode = entry.header().mode().unwrap();
                let mtime = entry.header().mtime().unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (name, mode, mtime, content)
            })
            .collect()
    }

    #[test]
    fn test_entries_in_tree_order() {
        let bytes = package().to_tar_gz(&ArchiveOptions::default()).unwrap();
        let entries = entries(&bytes);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "AccountService/package.json");
        assert_eq!(entries[0].3, "{}");
        assert_eq!(entries[1].0, "AccountService/index.js");
        assert_eq!(entries[1].3, "module.exports = {};");
    }

    #[test]
    fn test_header_values() {
        let options = ArchiveOptions::new().with_mtime(1_700_000_000);
        let bytes = package().to_tar_gz(&options).unwrap();

        for (_, mode, mtime, _) in entries(&bytes) {
            assert_eq!(mode, 0o644);
            assert_eq!(mtime, 1_700_000_000);
        }
    }

    #[test]
    fn test_byte_identical_runs() {
        let fs = package();
        let options = ArchiveOptions::default();
        assert_eq!(fs.to_tar_gz(&options).unwrap(), fs.to_tar_gz(&options).unwrap());
    }

    #[test]
    fn test_empty_tree() {
        let bytes = FileSystem::new().to_tar_gz(&ArchiveOptions::default()).unwrap();
        assert!(entries(&bytes).is_empty());
    }

    #[test]
    fn test_level_clamped() {
        assert_eq!(ArchiveOptions::new().with_level(42).level, 9);
    }
}
