//! In-memory storage backend.
//!
//! Keeps every entry in one `RwLock`-guarded ordered map keyed by normalized
//! absolute path. Suitable for tests and for virtual trees that never touch
//! the disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use crate::path_resolver::normalize;
use crate::{
    DirEntry, FileType, FsDir, FsError, FsPath, FsPermissions, FsRead, FsTimes, FsWrite, Metadata,
    Permissions, ReadDirIter, mime,
};

/// One stored entry.
#[derive(Debug, Clone)]
struct Node {
    file_type: FileType,
    data: Vec<u8>,
    permissions: Permissions,
    modified: SystemTime,
}

impl Node {
    fn file(data: Vec<u8>) -> Self {
        Self {
            file_type: FileType::File,
            data,
            permissions: Permissions::default_file(),
            modified: SystemTime::now(),
        }
    }

    fn dir(permissions: Permissions) -> Self {
        Self {
            file_type: FileType::Directory,
            data: Vec::new(),
            permissions,
            modified: SystemTime::now(),
        }
    }
}

/// An in-memory filesystem.
///
/// `/` always exists and is also the working directory: relative paths are
/// anchored there, so `a.txt` and `/a.txt` name the same entry.
///
/// # Example
///
/// ```rust
/// use adaptfs::{FsRead, FsWrite, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.write(Path::new("/hello.txt"), b"hi").unwrap();
/// assert_eq!(fs.read(Path::new("/hello.txt")).unwrap(), b"hi");
/// ```
#[derive(Debug)]
pub struct MemoryFs {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create an empty filesystem containing only `/`.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::dir(Permissions::default_dir()));
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    fn nodes(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn nodes_mut(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The map key for `path`: normalized and anchored at `/`.
fn key(path: &Path) -> PathBuf {
    normalize(&Path::new("/").join(path))
}

fn not_found(path: &Path) -> FsError {
    FsError::NotFound {
        path: path.to_path_buf(),
    }
}

/// The parent of `path` must be an existing directory.
fn check_parent(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> Result<(), FsError> {
    let parent = path.parent().ok_or_else(|| not_found(path))?;
    match nodes.get(parent) {
        Some(node) if node.file_type == FileType::Directory => Ok(()),
        Some(_) => Err(FsError::NotADirectory {
            path: parent.to_path_buf(),
        }),
        None => Err(not_found(parent)),
    }
}

fn has_children(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> bool {
    nodes.keys().any(|key| key.parent() == Some(path))
}

impl FsRead for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes().contains_key(&key(path))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
        let path = key(path);
        let nodes = self.nodes();
        let node = nodes.get(&path).ok_or_else(|| not_found(&path))?;
        Ok(Metadata {
            file_type: node.file_type,
            size: node.data.len() as u64,
            permissions: node.permissions,
            modified: node.modified,
        })
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let path = key(path);
        let nodes = self.nodes();
        match nodes.get(&path) {
            Some(node) if node.file_type == FileType::File => Ok(node.data.clone()),
            Some(_) => Err(FsError::NotAFile { path }),
            None => Err(not_found(&path)),
        }
    }

    fn sniff_mime(&self, path: &Path) -> Option<String> {
        let nodes = self.nodes();
        let node = nodes.get(&key(path))?;
        if node.file_type != FileType::File {
            return None;
        }
        let head = &node.data[..node.data.len().min(512)];
        mime::sniff(head).map(str::to_string)
    }
}

impl FsWrite for MemoryFs {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        check_parent(&nodes, &path)?;
        match nodes.get_mut(&path) {
            Some(node) if node.file_type == FileType::Directory => Err(FsError::NotAFile { path }),
            Some(node) => {
                node.data = data.to_vec();
                node.modified = SystemTime::now();
                Ok(())
            }
            None => {
                nodes.insert(path, Node::file(data.to_vec()));
                Ok(())
            }
        }
    }

    fn append(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        check_parent(&nodes, &path)?;
        match nodes.get_mut(&path) {
            Some(node) if node.file_type == FileType::Directory => Err(FsError::NotAFile { path }),
            Some(node) => {
                node.data.extend_from_slice(data);
                node.modified = SystemTime::now();
                Ok(())
            }
            None => {
                nodes.insert(path, Node::file(data.to_vec()));
                Ok(())
            }
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        match nodes.get(&path).map(|node| node.file_type) {
            Some(FileType::File) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(FileType::Directory) => Err(FsError::NotAFile { path }),
            None => Err(not_found(&path)),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let from = key(from);
        let to = key(to);
        if from == to {
            return Ok(());
        }

        let mut nodes = self.nodes_mut();
        let source = nodes.get(&from).ok_or_else(|| not_found(&from))?;
        let source_type = source.file_type;
        check_parent(&nodes, &to)?;

        if source_type == FileType::Directory && to.starts_with(&from) {
            return Err(FsError::InvalidOperation {
                path: from,
                reason: "cannot move a directory into itself".into(),
            });
        }

        match nodes.get(&to).map(|node| node.file_type) {
            Some(FileType::Directory) if source_type == FileType::File => {
                return Err(FsError::NotAFile { path: to });
            }
            Some(FileType::File) if source_type == FileType::Directory => {
                return Err(FsError::NotADirectory { path: to });
            }
            Some(FileType::Directory) if has_children(&nodes, &to) => {
                return Err(FsError::DirectoryNotEmpty { path: to });
            }
            _ => {}
        }

        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|key| key.starts_with(&from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let new = match old.strip_prefix(&from) {
                    Ok(rest) if !rest.as_os_str().is_empty() => to.join(rest),
                    _ => to.clone(),
                };
                nodes.insert(new, node);
            }
        }
        Ok(())
    }
}

impl FsDir for MemoryFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let path = key(path);
        let nodes = self.nodes();
        match nodes.get(&path) {
            Some(node) if node.file_type == FileType::Directory => {}
            Some(_) => return Err(FsError::NotADirectory { path }),
            None => return Err(not_found(&path)),
        }

        let entries: Vec<Result<DirEntry, FsError>> = nodes
            .keys()
            .filter(|key| key.parent() == Some(path.as_path()))
            .filter_map(|key| {
                let name = key.file_name()?.to_string_lossy().into_owned();
                Some(Ok(DirEntry {
                    name,
                    path: key.clone(),
                }))
            })
            .collect();
        Ok(ReadDirIter::from_vec(entries))
    }

    fn create_dir(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        if nodes.contains_key(&path) {
            return Err(FsError::AlreadyExists {
                path,
                operation: "create_dir",
            });
        }
        check_parent(&nodes, &path)?;
        nodes.insert(path, Node::dir(perm));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        let mut missing = Vec::new();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                return Err(not_found(&path));
            }
            match nodes.get(ancestor) {
                Some(node) if node.file_type == FileType::Directory => break,
                Some(_) => {
                    return Err(FsError::NotADirectory {
                        path: ancestor.to_path_buf(),
                    });
                }
                None => missing.push(ancestor.to_path_buf()),
            }
        }
        for dir in missing.into_iter().rev() {
            nodes.insert(dir, Node::dir(perm));
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        match nodes.get(&path) {
            Some(node) if node.file_type == FileType::Directory => {}
            Some(_) => return Err(FsError::NotADirectory { path }),
            None => return Err(not_found(&path)),
        }
        if has_children(&nodes, &path) {
            return Err(FsError::DirectoryNotEmpty { path });
        }
        nodes.remove(&path);
        Ok(())
    }
}

impl FsPermissions for MemoryFs {
    fn set_permissions(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        let node = nodes.get_mut(&path).ok_or_else(|| not_found(&path))?;
        node.permissions = perm;
        Ok(())
    }
}

impl FsTimes for MemoryFs {
    fn set_modified(&self, path: &Path, time: SystemTime) -> Result<(), FsError> {
        let path = key(path);
        let mut nodes = self.nodes_mut();
        if !nodes.contains_key(&path) {
            check_parent(&nodes, &path)?;
            nodes.insert(path.clone(), Node::file(Vec::new()));
        }
        if let Some(node) = nodes.get_mut(&path) {
            node.modified = time;
        }
        Ok(())
    }
}

impl FsPath for MemoryFs {}
