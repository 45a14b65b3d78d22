//! # Storage Traits
//!
//! The native I/O capability that entities call for every storage effect.
//!
//! ## Quick Reference
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`FsRead`] | `exists`, `metadata`, `read`, `sniff_mime` |
//! | [`FsWrite`] | `write`, `append`, `remove_file`, `rename` |
//! | [`FsDir`] | `read_dir`, `create_dir`, `create_dir_all`, `remove_dir` |
//! | [`FsPermissions`] | `set_permissions` |
//! | [`FsTimes`] | `set_modified` |
//! | [`FsPath`] | `canonicalize` (default provided) |
//!
//! ## Blanket Implementation
//!
//! [`Storage`] is implemented for every type that implements all component
//! traits. Backends never implement it directly.
//!
//! ## Object Safety
//!
//! All traits are object-safe. The adapter keeps its backend as a
//! `Box<dyn Storage>`:
//!
//! ```rust
//! use adaptfs::Storage;
//!
//! fn has_root(storage: &dyn Storage) -> bool {
//!     storage.exists(std::path::Path::new("/"))
//! }
//! ```

mod fs_dir;
mod fs_path;
mod fs_permissions;
mod fs_read;
mod fs_times;
mod fs_write;

pub use fs_dir::{FsDir, ReadDirIter};
pub use fs_path::FsPath;
pub use fs_permissions::FsPermissions;
pub use fs_read::FsRead;
pub use fs_times::FsTimes;
pub use fs_write::FsWrite;

/// A complete storage backend.
///
/// Combines every capability the entity layer needs. Implement the
/// component traits and this one comes for free.
pub trait Storage: FsRead + FsWrite + FsDir + FsPermissions + FsTimes + FsPath {}

impl<T: FsRead + FsWrite + FsDir + FsPermissions + FsTimes + FsPath> Storage for T {}
