//! Facade over a single [`Adapter`].

use crate::{Adapter, Directory, Entry, File, FsError};

/// Entry point holding one adapter and forwarding to it.
///
/// ```rust
/// use adaptfs::{Adapter, Entity, Filesystem, MemoryFs};
///
/// let fs = Filesystem::new(Adapter::unconfined(MemoryFs::new()));
/// fs.file("/a.txt").write("hi").unwrap();
/// assert!(fs.get("/a.txt").unwrap().is_file());
/// assert!(fs.get("/b.txt").is_none());
/// ```
#[derive(Debug)]
pub struct Filesystem {
    adapter: Adapter,
}

impl Filesystem {
    /// Wrap an adapter.
    pub fn new(adapter: Adapter) -> Self {
        Self { adapter }
    }

    /// A facade over the host filesystem rooted at `root`.
    ///
    /// # Errors
    ///
    /// Same as [`Adapter::local`].
    pub fn local(root: &str) -> Result<Self, FsError> {
        Adapter::local(root).map(Self::new)
    }

    /// The wrapped adapter.
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// See [`Adapter::get`].
    pub fn get(&self, path: &str) -> Option<Entry<'_>> {
        self.adapter.get(path)
    }

    /// See [`Adapter::file`].
    pub fn file(&self, path: &str) -> File<'_> {
        self.adapter.file(path)
    }

    /// See [`Adapter::directory`].
    pub fn directory(&self, path: &str) -> Directory<'_> {
        self.adapter.directory(path)
    }
}

impl Default for Filesystem {
    /// Unconfined access to the host filesystem; the empty path is the
    /// working directory.
    fn default() -> Self {
        Self::new(Adapter::unconfined(crate::NativeFs::new()))
    }
}

impl From<Adapter> for Filesystem {
    fn from(adapter: Adapter) -> Self {
        Self::new(adapter)
    }
}
