//! # adaptfs
//!
//! Object-oriented **file and directory entities** over a pluggable storage
//! backend, with optional confinement under a root directory.
//!
//! Application code talks to [`File`] and [`Directory`] values. Every storage
//! effect goes through the [`Storage`] capability of one [`Adapter`], so the
//! same code runs against the host filesystem ([`NativeFs`]) or an in-memory
//! tree ([`MemoryFs`]).
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use adaptfs::{Adapter, Entity, Filter, FsDir, MemoryFs, Permissions};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.create_dir(Path::new("/srv"), Permissions::default_dir()).unwrap();
//! let adapter = Adapter::new(fs, "/srv").unwrap();
//!
//! let docs = adapter.directory("").create("docs", 0o755).unwrap();
//! docs.create_file("readme.txt", "hello", 0o644).unwrap();
//! docs.create("drafts", 0o755).unwrap();
//!
//! let children = docs.read(Filter::All);
//! assert_eq!(children.len(), 2);
//! assert!(children[0].is_dir());
//!
//! // Paths never leave the root.
//! let escaped = adapter.file("../../etc/passwd");
//! assert_eq!(escaped.path(), Path::new("/srv/etc/passwd"));
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Filesystem`] | Facade holding one adapter |
//! | [`Adapter`] | Backend plus root; entity factory and path resolver |
//! | [`File`] | Whole-buffer content operations |
//! | [`Directory`] | Listing, recursive copy and delete |
//! | [`Entry`] | Either of the two, as returned by lookups and listings |
//! | [`Entity`] | Operations shared by every entity |
//! | [`FsError`] | Error type with path context |
//!
//! ---
//!
//! ## Storage Backends
//!
//! A backend implements the component traits ([`FsRead`], [`FsWrite`],
//! [`FsDir`], [`FsPermissions`], [`FsTimes`], [`FsPath`]) and receives
//! [`Storage`] through a blanket implementation.
//!
//! ```text
//! Filesystem → Adapter → File / Directory
//!                 ↓
//!           Box<dyn Storage>  (NativeFs, MemoryFs, ...)
//! ```
//!
//! ---
//!
//! ## Error Handling
//!
//! Storage failures propagate as `Result<T, FsError>`. Two groups of
//! operations degrade instead of failing:
//!
//! - metadata queries ([`Entity::mtime`], [`Entity::size`],
//!   [`Entity::permission`]) return `None`
//! - listings ([`Directory::read`], [`Directory::scan`]) return an empty list
//!
//! ---
//!
//! ## Logging
//!
//! Destructive operations are logged at `debug` level through the `log`
//! facade, degraded queries at `trace`. No logger is installed by this crate.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Metadata`], [`DirEntry`], [`Permissions`]; `AdapterConfig`; JSON helpers on [`File`] |

// Private modules
mod adapter;
mod entity;
mod error;
mod ext;
mod filesystem;
mod memory;
mod native;
mod path_resolver;
mod traits;
mod types;

// Public modules
pub mod mime;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{DirEntry, FileType, Metadata, Permissions};

// Public re-exports - storage traits
pub use traits::{FsDir, FsPath, FsPermissions, FsRead, FsTimes, FsWrite, ReadDirIter, Storage};

// Public re-exports - path resolution
pub use path_resolver::{ROOT_MARKER, RootResolver, WORKING_DIR_MARKER, normalize};

// Public re-exports - backends
pub use memory::MemoryFs;
pub use native::NativeFs;

// Public re-exports - adapter and entities
pub use adapter::Adapter;
pub use entity::{DEFAULT_MODE, Destination, Directory, Entity, EntityPath, Entry, File, Filter};
pub use filesystem::Filesystem;

// Public re-exports - infrastructure
pub use ext::FsExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use adapter::AdapterConfig;
