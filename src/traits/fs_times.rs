//! Timestamp operations.

use std::path::Path;
use std::time::SystemTime;

use crate::FsError;

/// Timestamp operations, the `touch` half of the native capability.
pub trait FsTimes: Send + Sync {
    /// Set the modification time of a path.
    ///
    /// Like `touch(1)`, an absent path is created as an empty file first.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent directory does not exist
    /// - [`FsError::PermissionDenied`] if the time cannot be changed
    fn set_modified(&self, path: &Path, time: SystemTime) -> Result<(), FsError>;
}
