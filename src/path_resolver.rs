//! # Path Resolution
//!
//! Turns caller-supplied path strings into backend paths and keeps them
//! inside the adapter root.
//!
//! ## Responsibility
//! - Lexical normalization of `.`/`..` and repeated separators ([`normalize`])
//! - Root confinement of resolved paths ([`RootResolver::resolve`])
//! - The portable, root-relative form entities remember ([`RootResolver::portable`])
//!
//! Nothing here touches storage; the target of a path does not need to exist.

use std::path::{Component, Path, PathBuf};

/// The portable path of the root itself.
pub const ROOT_MARKER: &str = "/";

/// The portable path of the working directory, used by unconfined resolvers
/// for an empty path.
pub const WORKING_DIR_MARKER: &str = ".";

/// Lexically normalize a path.
///
/// `.` components are dropped and `..` pops the previous component. A `..`
/// with nothing left to pop is discarded, so the result never climbs above
/// its starting point (`/` for absolute paths, the empty path otherwise).
///
/// ```rust
/// use adaptfs::normalize;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(normalize(Path::new("../../etc")), PathBuf::from("etc"));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            Component::Normal(name) => {
                normalized.push(name);
            }
        }
    }

    normalized
}

/// Resolves paths against an optional root directory.
///
/// With a root, every resolved path equals the root or lies below it. Without
/// one, normalized paths are passed through unchanged and relative paths stay
/// relative to the working directory.
#[derive(Debug, Clone, Default)]
pub struct RootResolver {
    root: Option<PathBuf>,
}

impl RootResolver {
    /// A resolver that confines every path under `root`.
    ///
    /// `root` should already be canonical; it is normalized once more so the
    /// prefix comparison in [`resolve`](Self::resolve) is exact.
    pub fn confined(root: impl AsRef<Path>) -> Self {
        Self {
            root: Some(normalize(root.as_ref())),
        }
    }

    /// A resolver without a root.
    pub fn unconfined() -> Self {
        Self { root: None }
    }

    /// The configured root, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve a caller path to a backend path.
    ///
    /// The path is normalized first. Under a root, a result that does not
    /// already start with the root is re-anchored as `root/<path>` with its
    /// leading separators removed. Without a root, a path that normalizes to
    /// nothing is the working directory (`.`). Applying `resolve` to its own
    /// output returns the same path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let normalized = normalize(Path::new(path));
        let Some(root) = &self.root else {
            if normalized.as_os_str().is_empty() {
                return PathBuf::from(WORKING_DIR_MARKER);
            }
            return normalized;
        };

        if normalized.starts_with(root) {
            return normalized;
        }

        let relative: PathBuf = normalized
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
        if relative.as_os_str().is_empty() {
            root.clone()
        } else {
            root.join(relative)
        }
    }

    /// The portable form of a caller path, as entities remember it.
    ///
    /// Trailing separators are trimmed. Under a root, an absolute path that
    /// lies inside the root is made root-relative, leading separators are
    /// trimmed too and an empty result becomes [`ROOT_MARKER`].
    ///
    /// Without a root, an empty path is the working directory
    /// ([`WORKING_DIR_MARKER`]) and only explicit separators mean `/`.
    pub fn portable(&self, path: &str) -> String {
        let portable = match &self.root {
            Some(root) => {
                let relative = match Path::new(path).strip_prefix(root) {
                    Ok(relative) => relative.to_string_lossy().into_owned(),
                    Err(_) => path.to_string(),
                };
                relative.trim_matches('/').to_string()
            }
            None if path.is_empty() => return WORKING_DIR_MARKER.to_string(),
            None => path.trim_end_matches('/').to_string(),
        };

        if portable.is_empty() {
            ROOT_MARKER.to_string()
        } else {
            portable
        }
    }
}

/// Join a child name onto a portable path.
///
/// Children of the working directory stay relative.
pub(crate) fn join_portable(parent: &str, name: &str) -> String {
    match parent {
        ROOT_MARKER => format!("/{name}"),
        WORKING_DIR_MARKER => name.to_string(),
        _ => format!("{parent}/{name}"),
    }
}

/// Replace the last component of a portable path with `name`.
pub(crate) fn sibling_portable(path: &str, name: &str) -> String {
    match path.rfind('/') {
        Some(index) => format!("{}/{name}", &path[..index]),
        None => name.to_string(),
    }
}
