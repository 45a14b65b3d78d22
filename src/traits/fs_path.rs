//! # FsPath Trait
//!
//! Path canonicalization with a default implementation.
//!
//! The adapter canonicalizes its configured root once, at construction. The
//! default implementation is purely lexical plus an existence check, which is
//! what in-memory backends want; native backends override it with the OS
//! call so symlinks in the root are resolved.

use std::path::{Path, PathBuf};

use crate::path_resolver::normalize;
use crate::{FsError, FsRead};

/// Path canonicalization with a default implementation.
pub trait FsPath: FsRead {
    /// Normalize `.`/`..` components and require the target to exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the normalized path does not exist
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, FsError> {
        let normalized = normalize(path);
        if self.exists(&normalized) {
            Ok(normalized)
        } else {
            Err(FsError::NotFound { path: normalized })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metadata;

    struct OnlyRoot;

    impl FsRead for OnlyRoot {
        fn exists(&self, path: &Path) -> bool {
            path == Path::new("/srv")
        }

        fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
            Err(FsError::NotFound {
                path: path.to_path_buf(),
            })
        }

        fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
            Err(FsError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    impl FsPath for OnlyRoot {}

    #[test]
    fn default_canonicalize_normalizes() {
        let fs = OnlyRoot;
        let path = fs.canonicalize(Path::new("/srv/./data/..")).unwrap();
        assert_eq!(path, PathBuf::from("/srv"));
    }

    #[test]
    fn default_canonicalize_requires_existence() {
        let fs = OnlyRoot;
        let result = fs.canonicalize(Path::new("/srv/missing"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }
}
