//! Error types for the adapter and entity layer.

use std::path::PathBuf;

/// Filesystem error type with contextual variants.
///
/// Backends report native failures through the `Io` family of variants; the
/// entity layer adds its own precondition failures (`NotFound`,
/// `InvalidOperation`, `InvalidFilter`) and the adapter reports a bad root
/// through `Configuration`.
///
/// # Examples
///
/// ```rust
/// use adaptfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The adapter root does not exist, is not a directory or is not writable.
    #[error("invalid root path [{root}]: {reason}")]
    Configuration {
        /// The root as given by the caller.
        root: String,
        /// Why the root was rejected.
        reason: String,
    },

    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The requested operation makes no sense for the given paths.
    #[error("invalid operation on {path}: {reason}")]
    InvalidOperation {
        /// The path the operation was attempted on.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Unknown directory read filter code.
    #[error("invalid filter value [{filter}] must be one of [1, 2, 3]")]
    InvalidFilter {
        /// The rejected filter code.
        filter: u32,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Directory is not empty when it should be.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Attach an operation and path to a raw I/O error.
    ///
    /// Common error kinds are turned into their dedicated variants so callers
    /// can match on them; everything else lands in [`FsError::Io`].
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path, operation },
            _ => FsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        FsError::io("io", PathBuf::new(), error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_not_found_display() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "not found: /missing");
    }

    #[test]
    fn fs_error_configuration_display() {
        let err = FsError::Configuration {
            root: "/nope".into(),
            reason: "does not exist".into(),
        };
        assert_eq!(err.to_string(), "invalid root path [/nope]: does not exist");
    }

    #[test]
    fn fs_error_invalid_filter_display() {
        let err = FsError::InvalidFilter { filter: 47558 };
        assert!(err.to_string().contains("47558"));
    }

    #[test]
    fn fs_error_io_keeps_context() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = FsError::io("write", "/data/a.txt", io_err);
        assert!(matches!(err, FsError::Io { operation: "write", .. }));
        assert!(err.to_string().contains("/data/a.txt"));
    }

    #[test]
    fn fs_error_from_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::NotFound { .. }));
    }

    #[test]
    fn fs_error_from_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::PermissionDenied { .. }));
    }

    #[test]
    fn fs_error_from_io_already_exists() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::AlreadyExists { .. }));
    }
}
