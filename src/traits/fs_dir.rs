//! Directory operations of a storage backend.

use std::path::Path;

use crate::{DirEntry, FsError, Permissions};

/// Directory operations for a storage backend.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// List the immediate children of a directory.
    ///
    /// `.` and `..` are never yielded. The outer `Result` indicates whether
    /// the directory could be opened; each item's `Result` indicates whether
    /// that specific entry could be read.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError>;

    /// Create a directory with the given mode (parent must exist).
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if parent directory does not exist
    /// - [`FsError::AlreadyExists`] if the path already exists
    fn create_dir(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;

    /// Create a directory and all missing parents with the given mode.
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if a component of the path exists but is not a directory
    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;

    /// Remove an empty directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory
    /// - [`FsError::DirectoryNotEmpty`] if the directory is not empty
    fn remove_dir(&self, path: &Path) -> Result<(), FsError>;
}

/// Iterator over directory entries.
///
/// Wraps a boxed iterator so every backend can return its own listing type.
pub struct ReadDirIter(Box<dyn Iterator<Item = Result<DirEntry, FsError>> + Send + 'static>);

impl ReadDirIter {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<DirEntry, FsError>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector.
    pub fn from_vec(entries: Vec<Result<DirEntry, FsError>>) -> Self {
        Self(Box::new(entries.into_iter()))
    }

    /// Collect the names of all readable entries, skipping broken ones.
    pub fn names(self) -> Vec<String> {
        self.filter_map(Result::ok).map(|entry| entry.name).collect()
    }
}

impl Iterator for ReadDirIter {
    type Item = Result<DirEntry, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str) -> DirEntry {
        DirEntry {
            name: name.into(),
            path: PathBuf::from("/").join(name),
        }
    }

    #[test]
    fn read_dir_iter_from_vec() {
        let iter = ReadDirIter::from_vec(vec![Ok(entry("a")), Ok(entry("b"))]);
        let collected: Vec<_> = iter.collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn read_dir_iter_names_skips_errors() {
        let entries = vec![
            Ok(entry("a")),
            Err(FsError::NotFound {
                path: PathBuf::from("/gone"),
            }),
            Ok(entry("c")),
        ];
        assert_eq!(ReadDirIter::from_vec(entries).names(), vec!["a", "c"]);
    }

    #[test]
    fn read_dir_iter_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ReadDirIter>();
    }
}
