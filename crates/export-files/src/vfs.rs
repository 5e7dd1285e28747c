//! In-memory package file tree.
//!
//! Files keep the order in which they were added, so directory exports and
//! archives list `package.json` before the modules, run after run.

use crate::types::{FileEntry, FilePath, FilesError, Result};
use std::path::Path;

/// In-memory tree of package files.
///
/// # Examples
///
/// ```
/// use rsocket_export_files::FileSystem;
///
/// let mut fs = FileSystem::new();
/// fs.add_file("/AccountService/package.json", "{}").unwrap();
/// fs.add_file("/AccountService/index.js", "module.exports = {};").unwrap();
///
/// assert_eq!(fs.read_file("/AccountService/package.json").unwrap(), "{}");
/// assert_eq!(fs.list_dir("/AccountService").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystem {
    files: Vec<(FilePath, FileEntry)>,
}

impl FileSystem {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a file, replacing the content of an existing one in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid absolute path.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = FilePath::new(path)?;
        let entry = FileEntry::new(content);

        match self.files.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = entry,
            None => self.files.push((path, entry)),
        }
        Ok(())
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if no file has this path.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let path = FilePath::new(path)?;
        self.files
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, entry)| entry.content())
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.to_string(),
            })
    }

    /// Returns `true` if a file has this path.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        FilePath::new(path).is_ok_and(|path| self.files.iter().any(|(p, _)| *p == path))
    }

    /// Lists the files directly inside `dir`.
    ///
    /// An empty directory that was never populated is indistinguishable from
    /// a missing one and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::NotADirectory`] if `dir` names a file.
    pub fn list_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<&FilePath>> {
        let dir = FilePath::new(dir)?;
        if self.files.iter().any(|(p, _)| *p == dir) {
            return Err(FilesError::NotADirectory {
                path: dir.to_string(),
            });
        }

        Ok(self
            .files
            .iter()
            .map(|(p, _)| p)
            .filter(|p| p.parent() == Some(dir.as_str()))
            .collect())
    }

    /// Iterates over files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &FileEntry)> {
        self.files.iter().map(|(p, e)| (p, e))
    }

    /// Returns every path in insertion order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&FilePath> {
        self.files.iter().map(|(p, _)| p).collect()
    }

    /// Number of files.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of all file sizes in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|(_, e)| e.size()).sum()
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
