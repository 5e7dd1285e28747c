//! Writing a package tree to disk.
//!
//! Export runs in three phases: collect the directories every file needs,
//! create them, then write files in tree order. Writes are atomic by default
//! (temp file, sync, rename).
//!
//! # Examples
//!
//! ```
//! use rsocket_export_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! # let output_dir = temp_dir.path();
//! let fs = FilesBuilder::new()
//!     .add_file("/AccountService/package.json", "{}")
//!     .add_file("/AccountService/index.js", "module.exports = {};")
//!     .build()
//!     .unwrap();
//!
//! fs.export_to_filesystem(output_dir).unwrap();
//! assert!(output_dir.join("AccountService/index.js").exists());
//! ```

use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How files are written to disk.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write through a temp file and rename
    pub atomic: bool,
    /// Replace files that already exist
    pub overwrite: bool,
}

impl ExportOptions {
    /// Atomic writes that overwrite existing files.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: true,
        }
    }

    /// Enables or disables atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Enables or disables overwriting.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    /// Writes every file below `base_path` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if `base_path` does not exist, or
    /// an I/O error if a directory or file cannot be written.
    pub fn export_to_filesystem(&self, base_path: impl AsRef<Path>) -> Result<()> {
        self.export_to_filesystem_with_options(base_path, &ExportOptions::default())
    }

    /// Writes every file below `base_path`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if `base_path` does not exist, or
    /// an I/O error if a directory or file cannot be written.
    pub fn export_to_filesystem_with_options(
        &self,
        base_path: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<()> {
        let base = base_path.as_ref();
        if !base.exists() {
            return Err(FilesError::FileNotFound {
                path: base.display().to_string(),
            });
        }

        let base = base.canonicalize().map_err(|e| io_error(base, e))?;

        let dirs = self.collect_directories(&base);
        for dir in &dirs {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        for (path, entry) in self.files() {
            let disk_path = Self::vfs_to_disk_path(path.as_str(), &base);
            write_file_atomic(&disk_path, entry.content(), options)?;
        }

        debug!(
            "Exported {} files ({} directories) to {}",
            self.file_count(),
            dirs.len(),
            base.display()
        );
        Ok(())
    }

    fn collect_directories(&self, base: &Path) -> BTreeSet<PathBuf> {
        let mut dirs = BTreeSet::new();
        for (path, _) in self.files() {
            let disk_path = Self::vfs_to_disk_path(path.as_str(), base);
            let mut current = disk_path.parent();
            while let Some(dir) = current {
                if dir == base || !dirs.insert(dir.to_path_buf()) {
                    break;
                }
                current = dir.parent();
            }
        }
        dirs
    }

    /// Maps a tree path onto a disk path below `base`.
    fn vfs_to_disk_path(vfs_path: &str, base: &Path) -> PathBuf {
        vfs_path
            .trim_start_matches('/')
            .split('/')
            .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FilesError {
    FilesError::IoError {
        path: path.display().to_string(),
        source,
    }
}

fn write_file_atomic(path: &Path, content: &str, options: &ExportOptions) -> Result<()> {
    if !options.overwrite && path.exists() {
        debug!("Keeping existing {}", path.display());
        return Ok(());
    }

    if !options.atomic {
        return fs::write(path, content).map_err(|e| io_error(path, e));
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| io_error(&temp_path, e))?;
    file.sync_all().map_err(|e| io_error(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| io_error(path, e))
}
