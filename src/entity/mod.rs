//! # Entities
//!
//! File and directory values bound to one [`Adapter`] and one path pair.
//!
//! ## Path Pair
//!
//! Every entity remembers two paths, kept together in [`EntityPath`]:
//!
//! | Path | Meaning |
//! |------|---------|
//! | original | Caller path in portable, root-relative form. Children and siblings are derived from it. |
//! | resolved | Backend path from [`Adapter::absolute_path`]. Every storage call uses it. |
//!
//! The pair is only ever rebuilt as a whole, on construction and after a
//! successful [`rename`](Entity::rename).
//!
//! ## Lifetimes
//!
//! Entities borrow their adapter (`'a`). The borrow checker keeps the adapter
//! alive for as long as any entity created from it.
//!
//! ## Deleted Entities
//!
//! `delete` removes the storage entry but leaves the value usable. Afterwards
//! [`exists`](Entity::exists) is `false`, metadata queries return `None` and
//! content operations fail with a native error.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, trace};

use crate::{Adapter, FileType, FsError, FsExt, Permissions};

mod directory;
mod file;

pub use directory::{Directory, Filter};
pub use file::File;

/// Mode used by [`move_to`](Entity::move_to) and by recursive copies when no
/// mode is given (`rwxrwxr-x`).
pub const DEFAULT_MODE: u32 = 0o775;

/// The original/resolved path pair of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPath {
    original: String,
    resolved: PathBuf,
}

impl EntityPath {
    /// Derive both paths from a caller path.
    pub(crate) fn bind(adapter: &Adapter, path: &str) -> Self {
        let original = adapter.portable_path(path);
        let resolved = adapter.absolute_path(&original);
        Self { original, resolved }
    }

    /// The portable path as remembered from the caller.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The backend path used for storage calls.
    pub fn resolved(&self) -> &Path {
        &self.resolved
    }
}

/// Where a copy or move should land: a path or an existing directory.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'d, 'a> {
    /// A caller path, resolved to a directory through the adapter.
    Path(&'d str),
    /// An existing directory entity.
    Directory(&'d Directory<'a>),
}

impl<'d, 'a> Destination<'d, 'a> {
    pub(crate) fn into_directory(self, adapter: &'a Adapter) -> Directory<'a> {
        match self {
            Destination::Path(path) => adapter.directory(path),
            Destination::Directory(directory) => directory.clone(),
        }
    }
}

impl<'d, 'a> From<&'d str> for Destination<'d, 'a> {
    fn from(path: &'d str) -> Self {
        Destination::Path(path)
    }
}

impl<'d, 'a> From<&'d String> for Destination<'d, 'a> {
    fn from(path: &'d String) -> Self {
        Destination::Path(path.as_str())
    }
}

impl<'d, 'a> From<&'d Directory<'a>> for Destination<'d, 'a> {
    fn from(directory: &'d Directory<'a>) -> Self {
        Destination::Directory(directory)
    }
}

/// Behaviour shared by files and directories.
///
/// Implementors provide access to their adapter and path pair plus the
/// variant-specific operations; everything else is provided.
///
/// # Example
///
/// ```rust
/// use adaptfs::{Adapter, Entity, MemoryFs};
///
/// let adapter = Adapter::new(MemoryFs::new(), "").unwrap();
/// let file = adapter.file("/notes.txt");
/// file.write("hello").unwrap();
///
/// assert!(file.exists());
/// assert_eq!(file.size(), Some(5));
/// assert_eq!(file.name(), "notes.txt");
/// ```
pub trait Entity<'a>: Sized {
    /// What [`copy_to`](Self::copy_to) and [`move_to`](Self::move_to) return.
    type Copy: Entity<'a>;

    /// The adapter this entity was created by.
    fn adapter(&self) -> &'a Adapter;

    /// The path pair.
    fn paths(&self) -> &EntityPath;

    /// Mutable access to the path pair, for rebinding it as a whole.
    fn paths_mut(&mut self) -> &mut EntityPath;

    /// `File` or `Directory`, without asking storage.
    fn file_type(&self) -> FileType;

    /// Copy this entity into a destination directory.
    ///
    /// # Errors
    ///
    /// Variant specific; see [`File::copy_to`] and [`Directory::copy_to`].
    fn copy_to<'d>(
        &self,
        destination: impl Into<Destination<'d, 'a>>,
        mode: u32,
    ) -> Result<Self::Copy, FsError>
    where
        'a: 'd;

    /// Remove the entry from storage.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    fn delete(&self) -> Result<&Self, FsError>;

    /// The resolved backend path.
    fn path(&self) -> &Path {
        self.paths().resolved()
    }

    /// The portable caller path.
    fn original_path(&self) -> &str {
        self.paths().original()
    }

    /// Last component of the resolved path.
    fn name(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The directory containing this entity.
    fn location(&self) -> PathBuf {
        self.path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path().to_path_buf())
    }

    /// Returns `true` for files.
    fn is_file(&self) -> bool {
        self.file_type() == FileType::File
    }

    /// Returns `true` for directories.
    fn is_dir(&self) -> bool {
        self.file_type() == FileType::Directory
    }

    /// Whether the entry exists in storage.
    fn exists(&self) -> bool {
        self.adapter().storage().exists(self.path())
    }

    /// Whether the backend allows reading the entry.
    fn is_readable(&self) -> bool {
        self.adapter().storage().can_read(self.path())
    }

    /// Whether the backend allows writing the entry.
    fn is_writable(&self) -> bool {
        self.adapter().storage().can_write(self.path())
    }

    /// Modification time, or `None` if the entry cannot be stat'ed.
    fn mtime(&self) -> Option<SystemTime> {
        match self.adapter().storage().metadata(self.path()) {
            Ok(meta) => Some(meta.modified),
            Err(err) => {
                trace!("mtime lookup failed: {err}");
                None
            }
        }
    }

    /// Size in bytes, or `None` if the entry cannot be stat'ed.
    fn size(&self) -> Option<u64> {
        match self.adapter().storage().file_size(self.path()) {
            Ok(size) => Some(size),
            Err(err) => {
                trace!("size lookup failed: {err}");
                None
            }
        }
    }

    /// Permission bits as a four digit octal string (`"0755"`), or `None` if
    /// the entry cannot be stat'ed.
    fn permission(&self) -> Option<String> {
        match self.adapter().storage().metadata(self.path()) {
            Ok(meta) => Some(meta.permissions.octal()),
            Err(err) => {
                trace!("permission lookup failed: {err}");
                None
            }
        }
    }

    /// Change the permission bits.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    fn chmod(&self, mode: u32) -> Result<&Self, FsError> {
        self.adapter()
            .storage()
            .set_permissions(self.path(), Permissions::from_mode(mode))?;
        Ok(self)
    }

    /// Set the modification time.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    fn touch(&self, time: SystemTime) -> Result<&Self, FsError> {
        self.adapter().storage().set_modified(self.path(), time)?;
        Ok(self)
    }

    /// Rename this entity in place.
    ///
    /// A bare name (no separator) renames within the current parent. When the
    /// new path resolves to the current one nothing is done at all.
    ///
    /// # Errors
    ///
    /// Native failures propagate; the path pair is only updated on success.
    fn rename(&mut self, new_path: &str) -> Result<&mut Self, FsError> {
        let trimmed = new_path.trim_end_matches('/');
        let target = if trimmed.contains('/') {
            trimmed.to_string()
        } else {
            crate::path_resolver::sibling_portable(self.original_path(), trimmed)
        };

        let adapter = self.adapter();
        let next = EntityPath::bind(adapter, &target);
        if next.resolved() == self.path() {
            return Ok(self);
        }

        adapter.storage().rename(self.path(), next.resolved())?;
        debug!("renamed {} to {}", self.path().display(), next.resolved().display());
        *self.paths_mut() = next;
        Ok(self)
    }

    /// Move this entity into a destination directory.
    ///
    /// Copies first, carries the modification time over to the copy, then
    /// deletes the source. If the copy fails the source is left untouched.
    ///
    /// # Errors
    ///
    /// Any failure from the copy, touch or delete step.
    fn move_to<'d>(
        &self,
        destination: impl Into<Destination<'d, 'a>>,
    ) -> Result<Self::Copy, FsError>
    where
        'a: 'd,
    {
        let moved = self.copy_to(destination, DEFAULT_MODE)?;
        if let Some(mtime) = self.mtime() {
            moved.touch(mtime)?;
        }
        self.delete()?;
        debug!("moved {} to {}", self.path().display(), moved.path().display());
        Ok(moved)
    }
}

/// Either kind of entity, as returned by [`Adapter::get`] and
/// [`Directory::read`].
#[derive(Debug, Clone)]
pub enum Entry<'a> {
    /// A regular file.
    File(File<'a>),
    /// A directory.
    Directory(Directory<'a>),
}

impl<'a> Entry<'a> {
    /// The file, if this entry is one.
    pub fn as_file(&self) -> Option<&File<'a>> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    /// The directory, if this entry is one.
    pub fn as_directory(&self) -> Option<&Directory<'a>> {
        match self {
            Entry::Directory(directory) => Some(directory),
            Entry::File(_) => None,
        }
    }

    /// Convert into the file, if this entry is one.
    pub fn into_file(self) -> Option<File<'a>> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    /// Convert into the directory, if this entry is one.
    pub fn into_directory(self) -> Option<Directory<'a>> {
        match self {
            Entry::Directory(directory) => Some(directory),
            Entry::File(_) => None,
        }
    }
}

impl<'a> Entity<'a> for Entry<'a> {
    type Copy = Entry<'a>;

    fn adapter(&self) -> &'a Adapter {
        match self {
            Entry::File(file) => file.adapter(),
            Entry::Directory(directory) => directory.adapter(),
        }
    }

    fn paths(&self) -> &EntityPath {
        match self {
            Entry::File(file) => file.paths(),
            Entry::Directory(directory) => directory.paths(),
        }
    }

    fn paths_mut(&mut self) -> &mut EntityPath {
        match self {
            Entry::File(file) => file.paths_mut(),
            Entry::Directory(directory) => directory.paths_mut(),
        }
    }

    fn file_type(&self) -> FileType {
        match self {
            Entry::File(_) => FileType::File,
            Entry::Directory(_) => FileType::Directory,
        }
    }

    fn copy_to<'d>(
        &self,
        destination: impl Into<Destination<'d, 'a>>,
        mode: u32,
    ) -> Result<Entry<'a>, FsError>
    where
        'a: 'd,
    {
        Ok(match self {
            Entry::File(file) => Entry::File(file.copy_to(destination, mode)?),
            Entry::Directory(directory) => Entry::Directory(directory.copy_to(destination, mode)?),
        })
    }

    fn delete(&self) -> Result<&Self, FsError> {
        match self {
            Entry::File(file) => {
                file.delete()?;
            }
            Entry::Directory(directory) => {
                directory.delete()?;
            }
        }
        Ok(self)
    }
}

impl<'a> From<File<'a>> for Entry<'a> {
    fn from(file: File<'a>) -> Self {
        Entry::File(file)
    }
}

impl<'a> From<Directory<'a>> for Entry<'a> {
    fn from(directory: Directory<'a>) -> Self {
        Entry::Directory(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;
    use std::time::Duration;

    fn adapter() -> Adapter {
        let fs = MemoryFs::new();
        Adapter::new(fs, "").unwrap()
    }

    #[test]
    fn bind_keeps_pair_consistent() {
        let adapter = adapter();
        let paths = EntityPath::bind(&adapter, "/docs/");
        assert_eq!(paths.original(), "/docs");
        assert_eq!(paths.resolved(), Path::new("/docs"));
    }

    #[test]
    fn empty_path_is_working_directory() {
        let adapter = adapter();
        let paths = EntityPath::bind(&adapter, "");
        assert_eq!(paths.original(), ".");
        assert_eq!(paths.resolved(), Path::new("."));

        let explicit = EntityPath::bind(&adapter, "/");
        assert_eq!(explicit.original(), "/");
        assert_eq!(explicit.resolved(), Path::new("/"));
    }

    #[test]
    fn metadata_queries_degrade_to_none() {
        let adapter = adapter();
        let ghost = adapter.file("/ghost.txt");
        assert!(!ghost.exists());
        assert_eq!(ghost.mtime(), None);
        assert_eq!(ghost.size(), None);
        assert_eq!(ghost.permission(), None);
        assert!(!ghost.is_readable());
        assert!(!ghost.is_writable());
    }

    #[test]
    fn chmod_and_touch_chain() {
        let adapter = adapter();
        let file = adapter.file("/a.txt");
        file.write("x").unwrap();
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(7);

        file.chmod(0o600).unwrap().touch(when).unwrap();
        assert_eq!(file.permission().as_deref(), Some("0600"));
        assert_eq!(file.mtime(), Some(when));
    }

    #[test]
    fn chmod_missing_entry_fails() {
        let adapter = adapter();
        let ghost = adapter.directory("/ghost");
        assert!(ghost.chmod(0o700).is_err());
    }

    #[test]
    fn name_and_location() {
        let adapter = adapter();
        let file = adapter.file("/a/b/c.txt");
        assert_eq!(file.name(), "c.txt");
        assert_eq!(file.location(), PathBuf::from("/a/b"));
        assert_eq!(adapter.directory("").name(), "");
    }

    #[test]
    fn rename_bare_name_stays_in_parent() {
        let adapter = adapter();
        let dir = adapter.directory("");
        dir.create("docs", 0o755).unwrap();
        let mut file = adapter.file("/docs/old.txt");
        file.write("body").unwrap();

        file.rename("new.txt").unwrap();
        assert_eq!(file.original_path(), "/docs/new.txt");
        assert_eq!(file.path(), Path::new("/docs/new.txt"));
        assert!(file.exists());
        assert!(!adapter.file("/docs/old.txt").exists());
    }

    #[test]
    fn entry_dispatches_to_variant() {
        let adapter = adapter();
        adapter.file("/f").write("1").unwrap();
        adapter.directory("").create("d", 0o755).unwrap();

        let file = adapter.get("/f").unwrap();
        let dir = adapter.get("/d").unwrap();
        assert!(file.is_file());
        assert!(dir.is_dir());
        assert!(file.as_file().is_some());
        assert!(dir.into_directory().is_some());
    }
}
