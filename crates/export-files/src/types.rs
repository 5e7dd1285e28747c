//! Paths, entries and errors of the package file tree.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_files::{FileEntry, FilePath};
//!
//! let path = FilePath::new("/AccountService/index.js").unwrap();
//! assert_eq!(path.archive_name(), "AccountService/index.js");
//!
//! let entry = FileEntry::new("module.exports = {};");
//! assert_eq!(entry.size(), 20);
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or exporting package files.
#[derive(Error, Debug)]
pub enum FilesError {
    /// File does not exist in the tree
    #[error("File not found: {path}")]
    FileNotFound {
        /// Requested path
        path: String,
    },

    /// Path exists but is a file, not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// Requested path
        path: String,
    },

    /// Path could not be interpreted
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// Offending path
        path: String,
    },

    /// Path does not start with `/`
    #[error("Path must be absolute: {path}")]
    PathNotAbsolute {
        /// Offending path
        path: String,
    },

    /// Path contains `..` or an empty segment
    #[error("Invalid path component in {path}: {reason}")]
    InvalidPathComponent {
        /// Offending path
        path: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Disk I/O failed
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path being read or written
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be written
    #[error("Failed to write archive entry {entry}: {source}")]
    ArchiveError {
        /// Entry being appended, or `<archive>` for the stream itself
        entry: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` for a missing file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` when a file was used as a directory.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` for any path validation failure.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::PathNotAbsolute { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` for disk or archive I/O failures.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. } | Self::ArchiveError { .. })
    }
}

/// Validated absolute path inside the package tree.
///
/// Always `/`-separated, never contains `..` or empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Validates and wraps a path.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::PathNotAbsolute`] if the path does not start
    /// with `/`, [`FilesError::InvalidPathComponent`] if it contains `..` or
    /// an empty segment, and [`FilesError::InvalidPath`] if it is not UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_files::FilePath;
    ///
    /// assert!(FilePath::new("/AccountService/package.json").is_ok());
    /// assert!(FilePath::new("AccountService/package.json").is_err());
    /// assert!(FilePath::new("/AccountService/../escape").is_err());
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = path.to_str().ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;

        if !raw.starts_with('/') {
            return Err(FilesError::PathNotAbsolute {
                path: raw.to_string(),
            });
        }

        let body = raw.trim_end_matches('/');
        for segment in body.split('/').skip(1) {
            if segment == ".." {
                return Err(FilesError::InvalidPathComponent {
                    path: raw.to_string(),
                    reason: "parent directory reference",
                });
            }
            if segment.is_empty() {
                return Err(FilesError::InvalidPathComponent {
                    path: raw.to_string(),
                    reason: "empty segment",
                });
            }
        }

        let normalized = if body.is_empty() { "/" } else { body };
        Ok(Self(normalized.to_string()))
    }

    /// Returns the path as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path relative to the tree root, as stored in archives.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    /// Returns the parent directory, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self.0.rfind('/') {
            Some(0) if self.0.len() > 1 => Some("/"),
            Some(0) | None => None,
            Some(index) => Some(&self.0[..index]),
        }
    }

    /// Returns `true` if `self` lies strictly below directory `dir`.
    #[must_use]
    pub fn is_under(&self, dir: &Self) -> bool {
        if dir.0 == "/" {
            return self.0.len() > 1;
        }
        self.0
            .strip_prefix(dir.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Text content of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    content: String,
}

impl FileEntry {
    /// Wraps content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the content size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.content.len()
    }
}

/// Result alias for file tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;
