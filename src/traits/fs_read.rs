//! Read and query operations of a storage backend.

use std::path::Path;

use crate::{FsError, Metadata};

/// Read operations for a storage backend.
///
/// All methods use `&self`. Backends that keep state manage their own
/// synchronization.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Check if a path exists.
    ///
    /// Never fails: anything that prevents the check counts as "absent".
    fn exists(&self, path: &Path) -> bool;

    /// Get metadata for a path.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn metadata(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Read entire file contents as bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    /// - [`FsError::PermissionDenied`] if read access is denied
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Guess the MIME type from the content of a file.
    ///
    /// Returns `None` when the backend cannot sniff content or does not
    /// recognise it. The default implementation never sniffs.
    fn sniff_mime(&self, _path: &Path) -> Option<String> {
        None
    }

    /// Whether the caller may read `path`.
    ///
    /// The default only looks at the permission bits. Backends with an
    /// ownership model override it with a real access check.
    fn can_read(&self, path: &Path) -> bool {
        self.metadata(path)
            .map(|meta| meta.permissions.readable())
            .unwrap_or(false)
    }

    /// Whether the caller may write `path`.
    ///
    /// Same default as [`can_read`](Self::can_read).
    fn can_write(&self, path: &Path) -> bool {
        self.metadata(path)
            .map(|meta| !meta.permissions.readonly())
            .unwrap_or(false)
    }
}
