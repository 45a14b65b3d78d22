//! Permission management operations.

use std::path::Path;

use crate::{FsError, Permissions};

/// Permission management operations.
///
/// Reading permissions is done via [`FsRead::metadata`](super::FsRead::metadata).
/// This trait only provides the ability to set them.
pub trait FsPermissions: Send + Sync {
    /// Set permissions on a file or directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn set_permissions(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;
}
