//! Write operations of a storage backend.

use std::path::Path;

use crate::FsError;

/// Write operations for a storage backend.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsWrite`.
pub trait FsWrite: Send + Sync {
    /// Write data to a file (creates if not exists, truncates if exists).
    ///
    /// Parent directories must exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if parent directory does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    /// - [`FsError::PermissionDenied`] if write access is denied
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Append data to a file (creates if not exists).
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if parent directory does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn append(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Rename or move a file or directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the source does not exist
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_write_is_object_safe() {
        fn _check(_: &dyn FsWrite) {}
    }
}
