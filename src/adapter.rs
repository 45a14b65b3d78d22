//! # Adapter
//!
//! Binds a storage backend to an optional root directory and hands out
//! entities.
//!
//! ## Responsibility
//! - Validate the configured root once, at construction
//! - Resolve caller paths through [`RootResolver`]
//! - Construct [`File`], [`Directory`] and [`Entry`] values
//!
//! ## Root
//!
//! An empty root leaves the adapter unconfined: paths are only normalized and
//! go to the backend as they are. A non-empty root must be an existing,
//! writable directory; every resolved path then stays inside it.
//!
//! ```rust
//! use adaptfs::{Adapter, FsDir, MemoryFs, Permissions};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.create_dir(Path::new("/srv"), Permissions::default_dir()).unwrap();
//! let adapter = Adapter::new(fs, "/srv").unwrap();
//!
//! assert_eq!(adapter.absolute_path("../etc/passwd"), Path::new("/srv/etc/passwd"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::{Directory, Entry, File, FsError, FsExt, NativeFs, RootResolver, Storage};

/// A storage backend bound to an optional root.
///
/// Entities borrow the adapter that created them, so it must outlive them.
pub struct Adapter {
    storage: Box<dyn Storage>,
    resolver: RootResolver,
}

impl Adapter {
    /// Bind `storage` to `root`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Configuration`] if `root` is non-empty and does not exist,
    ///   is not a directory or is not writable
    pub fn new(storage: impl Storage + 'static, root: &str) -> Result<Self, FsError> {
        if root.is_empty() {
            return Ok(Self::unconfined(storage));
        }

        let configuration = |reason: String| FsError::Configuration {
            root: root.to_string(),
            reason,
        };
        let canonical = storage
            .canonicalize(Path::new(root))
            .map_err(|e| configuration(e.to_string()))?;
        let meta = storage
            .metadata(&canonical)
            .map_err(|e| configuration(e.to_string()))?;
        if !meta.is_dir() {
            return Err(configuration("not a directory".into()));
        }
        if !storage.can_write(&canonical) {
            return Err(configuration("not writable".into()));
        }

        debug!("adapter rooted at {}", canonical.display());
        Ok(Self {
            storage: Box::new(storage),
            resolver: RootResolver::confined(canonical),
        })
    }

    /// Bind `storage` without a root.
    pub fn unconfined(storage: impl Storage + 'static) -> Self {
        debug!("adapter created without root");
        Self {
            storage: Box::new(storage),
            resolver: RootResolver::unconfined(),
        }
    }

    /// An adapter over the host filesystem.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn local(root: &str) -> Result<Self, FsError> {
        Self::new(NativeFs::new(), root)
    }

    /// The backend every storage call goes to.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// The canonical root, if the adapter is confined.
    pub fn root(&self) -> Option<&Path> {
        self.resolver.root()
    }

    /// A file entity for `path`. Does not touch storage.
    pub fn file(&self, path: &str) -> File<'_> {
        File::new(self, path)
    }

    /// A directory entity for `path`. Does not touch storage.
    pub fn directory(&self, path: &str) -> Directory<'_> {
        Directory::new(self, path)
    }

    /// Classify `path` in storage.
    ///
    /// Returns `None` when nothing exists there.
    pub fn get(&self, path: &str) -> Option<Entry<'_>> {
        let resolved = self.absolute_path(path);
        if self.storage().is_file(&resolved) {
            Some(Entry::File(self.file(path)))
        } else if self.storage().is_dir(&resolved) {
            Some(Entry::Directory(self.directory(path)))
        } else {
            None
        }
    }

    /// The backend path for a caller path. Pure; never touches storage.
    pub fn absolute_path(&self, path: &str) -> PathBuf {
        self.resolver.resolve(path)
    }

    /// The portable, root-relative form entities remember.
    pub fn portable_path(&self, path: &str) -> String {
        self.resolver.portable(path)
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("root", &self.resolver.root())
            .finish_non_exhaustive()
    }
}

/// Serializable adapter settings.
///
/// ```rust
/// use adaptfs::AdapterConfig;
///
/// let config = AdapterConfig::from_json(r#"{ "root": "" }"#).unwrap();
/// let adapter = config.build().unwrap();
/// assert!(adapter.root().is_none());
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdapterConfig {
    /// Root directory; empty for an unconfined adapter.
    #[serde(default)]
    pub root: String,
}

#[cfg(feature = "serde")]
impl AdapterConfig {
    /// Parse settings from JSON.
    ///
    /// # Errors
    ///
    /// - [`FsError::Deserialization`] for malformed input
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        serde_json::from_str(json).map_err(|e| FsError::Deserialization(e.to_string()))
    }

    /// Build a local adapter from these settings.
    ///
    /// # Errors
    ///
    /// Same as [`Adapter::local`].
    pub fn build(&self) -> Result<Adapter, FsError> {
        Adapter::local(&self.root)
    }
}
