//! Directory entities: listing and recursive operations.

use log::{debug, trace};

use crate::path_resolver::join_portable;
use crate::{Adapter, FileType, FsError, Permissions};

use super::{Destination, Entity, EntityPath, Entry, File};

/// Which children [`Directory::read`] returns.
///
/// The numeric codes are stable; [`TryFrom<u32>`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Filter {
    /// Directories first, then files.
    #[default]
    All = 1,
    /// Files only.
    File = 2,
    /// Directories only.
    Dir = 3,
}

impl TryFrom<u32> for Filter {
    type Error = FsError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Filter::All),
            2 => Ok(Filter::File),
            3 => Ok(Filter::Dir),
            filter => Err(FsError::InvalidFilter { filter }),
        }
    }
}

/// A directory bound to an adapter.
///
/// Constructing one never touches storage; see [`Adapter::directory`].
#[derive(Debug, Clone)]
pub struct Directory<'a> {
    adapter: &'a Adapter,
    paths: EntityPath,
}

impl<'a> Directory<'a> {
    pub(crate) fn new(adapter: &'a Adapter, path: &str) -> Self {
        Self {
            adapter,
            paths: EntityPath::bind(adapter, path),
        }
    }

    /// Names of the immediate children, sorted.
    ///
    /// Empty when the directory cannot be listed.
    pub fn scan(&self) -> Vec<String> {
        match self.adapter.storage().read_dir(self.path()) {
            Ok(entries) => {
                let mut names = entries.names();
                names.sort();
                names
            }
            Err(err) => {
                trace!("listing {} failed: {err}", self.path().display());
                Vec::new()
            }
        }
    }

    /// Immediate children as entities, selected by `filter`.
    ///
    /// Each child is classified through [`Adapter::get`]; children that vanish
    /// between listing and classification are skipped. With [`Filter::All`]
    /// directories come before files.
    pub fn read(&self, filter: Filter) -> Vec<Entry<'a>> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for name in self.scan() {
            let child = join_portable(self.original_path(), &name);
            match self.adapter.get(&child) {
                Some(entry) if entry.is_dir() => dirs.push(entry),
                Some(entry) => files.push(entry),
                None => {}
            }
        }

        match filter {
            Filter::All => {
                dirs.append(&mut files);
                dirs
            }
            Filter::File => files,
            Filter::Dir => dirs,
        }
    }

    /// Ensure a child directory exists with the given mode.
    ///
    /// A missing child is created; an existing one only has its mode changed.
    /// The parent must exist.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn create(&self, name: &str, mode: u32) -> Result<Directory<'a>, FsError> {
        self.ensure_child(name, mode, false)
    }

    /// Like [`create`](Self::create), but also creates missing intermediate
    /// directories when `name` spans several components.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn create_all(&self, name: &str, mode: u32) -> Result<Directory<'a>, FsError> {
        self.ensure_child(name, mode, true)
    }

    fn ensure_child(&self, name: &str, mode: u32, recursive: bool) -> Result<Directory<'a>, FsError> {
        let child = self.adapter.directory(&join_portable(self.original_path(), name));
        let storage = self.adapter.storage();
        let perm = Permissions::from_mode(mode);

        if storage.exists(child.path()) {
            storage.set_permissions(child.path(), perm)?;
        } else if recursive {
            storage.create_dir_all(child.path(), perm)?;
        } else {
            storage.create_dir(child.path(), perm)?;
        }
        Ok(child)
    }

    /// Create (or overwrite) a file in this directory.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn create_file(
        &self,
        name: &str,
        content: impl AsRef<[u8]>,
        mode: u32,
    ) -> Result<File<'a>, FsError> {
        File::create_in(self.adapter, &join_portable(self.original_path(), name), content, mode)
    }
}

impl<'a> Entity<'a> for Directory<'a> {
    type Copy = Directory<'a>;

    fn adapter(&self) -> &'a Adapter {
        self.adapter
    }

    fn paths(&self) -> &EntityPath {
        &self.paths
    }

    fn paths_mut(&mut self) -> &mut EntityPath {
        &mut self.paths
    }

    fn file_type(&self) -> FileType {
        FileType::Directory
    }

    /// Recursively copy this directory into `destination`.
    ///
    /// A directory named like this one is created (or reused) inside the
    /// destination and every child is copied into it. A child directory that
    /// is the destination itself is skipped, so copying a directory into one
    /// of its own children terminates.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidOperation`] if the destination is this directory
    /// - [`FsError::NotFound`] if this directory does not exist
    /// - native failures from creating or copying children
    fn copy_to<'d>(
        &self,
        destination: impl Into<Destination<'d, 'a>>,
        mode: u32,
    ) -> Result<Directory<'a>, FsError>
    where
        'a: 'd,
    {
        let destination = destination.into().into_directory(self.adapter);
        if destination.path() == self.path() {
            return Err(FsError::InvalidOperation {
                path: self.path().to_path_buf(),
                reason: "source and destination can not be the same".into(),
            });
        }
        if !self.exists() {
            return Err(FsError::NotFound {
                path: self.path().to_path_buf(),
            });
        }

        let target = destination.create(&self.name(), mode)?;
        for entry in self.read(Filter::All) {
            if entry.is_dir() && entry.path() == destination.path() {
                continue;
            }
            entry.copy_to(&target, mode)?;
        }
        debug!("copied {} to {}", self.path().display(), target.path().display());
        Ok(target)
    }

    /// Recursively delete this directory and everything below it.
    ///
    /// Deleting a directory that does not exist does nothing.
    ///
    /// # Errors
    ///
    /// Native failures propagate; children deleted before the failure stay
    /// deleted.
    fn delete(&self) -> Result<&Self, FsError> {
        if !self.exists() {
            return Ok(self);
        }

        for entry in self.read(Filter::All) {
            entry.delete()?;
        }
        self.adapter.storage().remove_dir(self.path())?;
        debug!("deleted directory {}", self.path().display());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;

    fn adapter() -> Adapter {
        let fs = MemoryFs::new();
        fs_setup(&fs);
        Adapter::new(fs, "/srv").unwrap()
    }

    fn fs_setup(fs: &MemoryFs) {
        use crate::FsDir;
        fs.create_dir(std::path::Path::new("/srv"), Permissions::default_dir())
            .unwrap();
    }

    fn populated(adapter: &Adapter) -> Directory<'_> {
        let dir = adapter.directory("").create("box", 0o755).unwrap();
        dir.create_file("file1", "foo", 0o644).unwrap();
        dir.create_file("file2", "bar", 0o644).unwrap();
        dir.create("dir", 0o755).unwrap();
        dir
    }

    #[test]
    fn filter_codes() {
        assert_eq!(Filter::try_from(1).unwrap(), Filter::All);
        assert_eq!(Filter::try_from(2).unwrap(), Filter::File);
        assert_eq!(Filter::try_from(3).unwrap(), Filter::Dir);
        assert!(matches!(
            Filter::try_from(99999),
            Err(FsError::InvalidFilter { filter: 99999 })
        ));
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn read_orders_directories_first() {
        let adapter = adapter();
        let dir = populated(&adapter);

        let all = dir.read(Filter::All);
        assert_eq!(all.len(), 3);
        assert!(all[0].is_dir());
        assert!(all[1].is_file() && all[2].is_file());
        assert_eq!(dir.read(Filter::File).len(), 2);
        assert_eq!(dir.read(Filter::Dir).len(), 1);
    }

    #[test]
    fn scan_returns_raw_names() {
        let adapter = adapter();
        let dir = populated(&adapter);
        assert_eq!(dir.scan(), vec!["dir", "file1", "file2"]);
    }

    #[test]
    fn read_and_scan_of_missing_directory_are_empty() {
        let adapter = adapter();
        let ghost = adapter.directory("ghost");
        assert!(ghost.read(Filter::All).is_empty());
        assert!(ghost.scan().is_empty());
    }

    #[test]
    fn children_keep_portable_paths() {
        let adapter = adapter();
        let dir = populated(&adapter);
        assert_eq!(dir.original_path(), "box");
        let children = dir.read(Filter::Dir);
        assert_eq!(children[0].original_path(), "box/dir");
        assert_eq!(children[0].path(), std::path::Path::new("/srv/box/dir"));
    }

    #[test]
    fn create_is_ensure() {
        let adapter = adapter();
        let root = adapter.directory("");
        let first = root.create("mydir", 0o755).unwrap();
        let second = root.create("mydir", 0o700).unwrap();

        assert_eq!(first.name(), "mydir");
        assert_eq!(second.name(), "mydir");
        assert_eq!(first.permission().as_deref(), Some("0700"));
        assert_eq!(root.scan(), vec!["mydir"]);
    }

    #[test]
    fn create_requires_parent_unless_recursive() {
        let adapter = adapter();
        let root = adapter.directory("");
        assert!(root.create("a/b/c", 0o755).is_err());

        let deep = root.create_all("a/b/c", 0o755).unwrap();
        assert!(deep.exists());
        assert_eq!(deep.original_path(), "a/b/c");
    }

    #[test]
    fn delete_is_recursive_and_idempotent() {
        let adapter = adapter();
        let dir = populated(&adapter);
        dir.create("dir", 0o755)
            .unwrap()
            .create_file("deep", "x", 0o644)
            .unwrap();

        dir.delete().unwrap();
        assert!(!dir.exists());
        dir.delete().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn copy_to_self_is_rejected() {
        let adapter = adapter();
        let dir = populated(&adapter);
        let err = dir.copy_to(&dir, 0o755).unwrap_err();
        assert!(matches!(err, FsError::InvalidOperation { .. }));
    }

    #[test]
    fn copy_to_missing_source_is_not_found() {
        let adapter = adapter();
        adapter.directory("").create("copies", 0o755).unwrap();
        let ghost = adapter.directory("ghost");
        let err = ghost.copy_to("copies", 0o755).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn copy_to_copies_tree() {
        let adapter = adapter();
        let dir = populated(&adapter);
        adapter.directory("").create("copies", 0o755).unwrap();

        let copy = dir.copy_to("copies", 0o755).unwrap();
        assert_eq!(copy.original_path(), "copies/box");
        assert_eq!(copy.read(Filter::All).len(), 3);
        assert_eq!(adapter.file("copies/box/file1").read(), b"foo");
    }
}
