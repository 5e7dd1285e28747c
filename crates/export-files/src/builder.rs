//! Fluent construction of package file trees.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_files::FilesBuilder;
//!
//! let fs = FilesBuilder::new()
//!     .add_file("/AccountService/package.json", "{}")
//!     .add_file("/AccountService/index.js", "module.exports = {};")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.file_count(), 2);
//! ```

use crate::filesystem::ExportOptions;
use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use rsocket_export_codegen::GeneratedCode;
use std::path::{Path, PathBuf};

/// Builder for a [`FileSystem`].
///
/// Path errors are collected while adding and the first one is returned by
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::{GeneratedCode, GeneratedFile};
/// use rsocket_export_files::FilesBuilder;
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile::new("AccountService/index.js", "// js"));
///
/// let fs = FilesBuilder::from_generated_code(code, "/").build().unwrap();
/// assert!(fs.exists("/AccountService/index.js"));
/// ```
#[derive(Debug, Default)]
pub struct FilesBuilder {
    fs: FileSystem,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places every generated file under `base_path`.
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode, base_path: impl AsRef<Path>) -> Self {
        let base = base_path.as_ref().to_string_lossy();
        let base = if base.ends_with('/') {
            base.into_owned()
        } else {
            format!("{base}/")
        };

        code.files.into_iter().fold(Self::new(), |builder, file| {
            builder.add_file(format!("{base}{}", file.path), file.content)
        })
    }

    /// Adds one file.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.fs.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        for (path, content) in files {
            if let Err(e) = self.fs.add_file(path, content) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Number of files added so far.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.fs.file_count()
    }

    /// Returns the tree.
    ///
    /// # Errors
    ///
    /// Returns the first path error recorded while adding files.
    ///
    /// ```
    /// use rsocket_export_files::FilesBuilder;
    ///
    /// let result = FilesBuilder::new().add_file("relative/index.js", "").build();
    /// assert!(result.unwrap_err().is_invalid_path());
    /// ```
    pub fn build(self) -> Result<FileSystem> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.fs),
        }
    }

    /// Builds the tree and writes it below `base_path` with default options.
    ///
    /// A leading `~` expands to the home directory.
    ///
    /// # Errors
    ///
    /// Returns a path error from building, or an I/O error from writing.
    ///
    /// ```no_run
    /// use rsocket_export_files::FilesBuilder;
    ///
    /// FilesBuilder::new()
    ///     .add_file("/AccountService/index.js", "// js")
    ///     .build_and_export("~/npm")?;
    /// # Ok::<(), rsocket_export_files::FilesError>(())
    /// ```
    pub fn build_and_export(self, base_path: impl AsRef<Path>) -> Result<FileSystem> {
        let fs = self.build()?;
        let base = expand_tilde(base_path.as_ref())?;
        fs.export_to_filesystem_with_options(&base, &ExportOptions::default())?;
        Ok(fs)
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is not UTF-8 or the home directory is
/// unknown.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let raw = path.to_str().ok_or_else(|| FilesError::InvalidPath {
        path: path.display().to_string(),
    })?;

    let rest = match raw {
        "~" => "",
        _ => match raw.strip_prefix("~/") {
            Some(rest) => rest,
            None => return Ok(path.to_path_buf()),
        },
    };

    let home = dirs::home_dir().ok_or_else(|| FilesError::IoError {
        path: raw.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "cannot determine home directory"),
    })?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
