//! Local storage backend over `std::fs`.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::{
    DirEntry, FileType, FsDir, FsError, FsPath, FsPermissions, FsRead, FsTimes, FsWrite, Metadata,
    Permissions, ReadDirIter, mime,
};

/// Number of leading bytes inspected when sniffing content.
const SNIFF_LEN: u64 = 512;

/// The host filesystem.
///
/// Stateless; every call goes straight to the OS. Paths are used as given,
/// confinement is the adapter's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl NativeFs {
    /// Create a native backend.
    pub fn new() -> Self {
        Self
    }
}

impl FsRead for NativeFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
        let meta = fs::metadata(path).map_err(|e| FsError::io("stat", path, e))?;
        let file_type = if meta.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };
        let modified = meta
            .modified()
            .map_err(|e| FsError::io("stat", path, e))?;

        Ok(Metadata {
            file_type,
            size: meta.len(),
            permissions: permissions_of(&meta),
            modified,
        })
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| FsError::io("read", path, e))
    }

    fn sniff_mime(&self, path: &Path) -> Option<String> {
        let file = fs::File::open(path).ok()?;
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        file.take(SNIFF_LEN).read_to_end(&mut head).ok()?;
        mime::sniff(&head).map(str::to_string)
    }

    fn can_read(&self, path: &Path) -> bool {
        accessible(path, false)
    }

    fn can_write(&self, path: &Path) -> bool {
        accessible(path, true)
    }
}

impl FsWrite for NativeFs {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        fs::write(path, data).map_err(|e| FsError::io("write", path, e))
    }

    fn append(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FsError::io("append", path, e))?;
        file.write_all(data)
            .map_err(|e| FsError::io("append", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|e| FsError::io("remove_file", path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::rename(from, to).map_err(|e| FsError::io("rename", from, e))
    }
}

impl FsDir for NativeFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let entries = fs::read_dir(path).map_err(|e| FsError::io("read_dir", path, e))?;
        let owner = path.to_path_buf();
        Ok(ReadDirIter::new(entries.map(move |entry| {
            let entry = entry.map_err(|e| FsError::io("read_dir", owner.clone(), e))?;
            Ok(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
            })
        })))
    }

    fn create_dir(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        dir_builder(perm, false)
            .create(path)
            .map_err(|e| FsError::io("create_dir", path, e))
    }

    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        dir_builder(perm, true)
            .create(path)
            .map_err(|e| FsError::io("create_dir_all", path, e))
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_dir(path).map_err(|e| FsError::io("remove_dir", path, e))
    }
}

impl FsPermissions for NativeFs {
    fn set_permissions(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        fs::set_permissions(path, to_std_permissions(path, perm)?)
            .map_err(|e| FsError::io("chmod", path, e))
    }
}

impl FsTimes for NativeFs {
    fn set_modified(&self, path: &Path, time: SystemTime) -> Result<(), FsError> {
        let file = if path.exists() {
            fs::File::open(path)
        } else {
            fs::File::create(path)
        }
        .map_err(|e| FsError::io("touch", path, e))?;
        file.set_modified(time)
            .map_err(|e| FsError::io("touch", path, e))
    }
}

impl FsPath for NativeFs {
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, FsError> {
        fs::canonicalize(path).map_err(|e| FsError::io("canonicalize", path, e))
    }
}

#[cfg(unix)]
fn permissions_of(meta: &fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(meta.permissions().mode())
}

#[cfg(not(unix))]
fn permissions_of(meta: &fs::Metadata) -> Permissions {
    let base = if meta.is_dir() { 0o777 } else { 0o666 };
    if meta.permissions().readonly() {
        Permissions::from_mode(base & !0o222)
    } else {
        Permissions::from_mode(base)
    }
}

#[cfg(unix)]
fn to_std_permissions(_path: &Path, perm: Permissions) -> Result<fs::Permissions, FsError> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(perm.mode()))
}

#[cfg(not(unix))]
fn to_std_permissions(path: &Path, perm: Permissions) -> Result<fs::Permissions, FsError> {
    let mut permissions = fs::metadata(path)
        .map_err(|e| FsError::io("chmod", path, e))?
        .permissions();
    permissions.set_readonly(perm.readonly());
    Ok(permissions)
}

/// Ask the OS whether the calling process may read or write `path`.
#[cfg(unix)]
fn accessible(path: &Path, write: bool) -> bool {
    use rustix::fs::{Access, access};
    let mode = if write { Access::WRITE_OK } else { Access::READ_OK };
    access(path, mode).is_ok()
}

#[cfg(not(unix))]
fn accessible(path: &Path, write: bool) -> bool {
    match fs::metadata(path) {
        Ok(meta) => !write || !meta.permissions().readonly(),
        Err(_) => false,
    }
}

fn dir_builder(perm: Permissions, recursive: bool) -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(perm.mode());
    }
    #[cfg(not(unix))]
    let _ = perm;
    builder
}
