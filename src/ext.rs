//! # Extension Traits
//!
//! Classification helpers built on [`FsRead::metadata`].
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`is_file`](FsExt::is_file) | Path is a regular file |
//! | [`is_dir`](FsExt::is_dir) | Path is a directory |
//! | [`file_size`](FsExt::file_size) | Size in bytes |

use crate::{FsError, FsRead};
use std::path::Path;

/// Extension methods for any storage backend.
///
/// The adapter classifies paths with these; a path that cannot be
/// stat'ed is neither a file nor a directory.
///
/// # Example
///
/// ```rust
/// use adaptfs::{FsExt, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// assert!(fs.is_dir(Path::new("/")));
/// assert!(!fs.is_file(Path::new("/missing.txt")));
/// ```
pub trait FsExt: FsRead {
    /// Check if the path points to a regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Check if the path points to a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    /// Get the size of a file in bytes.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` if the path doesn't exist.
    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        Ok(self.metadata(path)?.size)
    }
}

// Blanket implementation - any backend gets FsExt for free
impl<B: FsRead + ?Sized> FsExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileType, Metadata};
    use std::path::PathBuf;

    /// Mock backend for testing
    struct MockFs {
        file_exists: bool,
        dir_exists: bool,
    }

    impl MockFs {
        fn with_file() -> Self {
            Self {
                file_exists: true,
                dir_exists: false,
            }
        }

        fn with_dir() -> Self {
            Self {
                file_exists: false,
                dir_exists: true,
            }
        }

        fn empty() -> Self {
            Self {
                file_exists: false,
                dir_exists: false,
            }
        }
    }

    impl FsRead for MockFs {
        fn exists(&self, _: &Path) -> bool {
            self.file_exists || self.dir_exists
        }

        fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
            let file_type = if self.file_exists {
                FileType::File
            } else if self.dir_exists {
                FileType::Directory
            } else {
                return Err(FsError::NotFound {
                    path: PathBuf::from(path),
                });
            };
            Ok(Metadata {
                file_type,
                size: 42,
                ..Default::default()
            })
        }

        fn read(&self, _: &Path) -> Result<Vec<u8>, FsError> {
            Ok(vec![])
        }
    }

    #[test]
    fn is_file_classifies() {
        assert!(MockFs::with_file().is_file(Path::new("/a")));
        assert!(!MockFs::with_dir().is_file(Path::new("/a")));
        assert!(!MockFs::empty().is_file(Path::new("/a")));
    }

    #[test]
    fn is_dir_classifies() {
        assert!(MockFs::with_dir().is_dir(Path::new("/a")));
        assert!(!MockFs::with_file().is_dir(Path::new("/a")));
        assert!(!MockFs::empty().is_dir(Path::new("/a")));
    }

    #[test]
    fn file_size_reads_metadata() {
        assert_eq!(MockFs::with_file().file_size(Path::new("/a")).unwrap(), 42);
        assert!(MockFs::empty().file_size(Path::new("/a")).is_err());
    }
}
