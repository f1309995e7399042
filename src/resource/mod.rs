// src/resource/mod.rs

//! Build inputs and outputs.
//!
//! - [`dependency`] holds the closed set of things a task can depend on.
//! - [`target`] holds the closed set of things a task can produce.
//! - [`hash`] computes content digests for the hash stamper.
//!
//! Both sides share the same identity type, [`ResourceKey`]. A dependency is
//! made by a task exactly when one of that task's targets has an equal key:
//! same kind, same normalised path.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

pub mod dependency;
pub mod hash;
pub mod target;

pub use dependency::{DirDependency, Dependency, FileDependency, FileStamper};
pub use hash::compute_file_hash;
pub use target::{DirTarget, FileTarget, Target};

/// What kind of filesystem object a resource refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    File,
    Dir,
}

/// Identity of a dependency or target, independent of its current state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub path: PathBuf,
}

impl ResourceKey {
    pub fn new(kind: ResourceKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: normalize_path(path.as_ref()),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ResourceKind::File => "file",
            ResourceKind::Dir => "dir",
        };
        write!(f, "{} '{}'", kind, self.path.display())
    }
}

/// Comparable fingerprint of a resource's current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signature {
    /// Last-modified time.
    Modified(SystemTime),
    /// blake3 hex digest of the contents.
    Digest(String),
}

impl Signature {
    /// The timestamp, if this signature is one.
    pub fn as_modified(&self) -> Option<SystemTime> {
        match self {
            Signature::Modified(time) => Some(*time),
            Signature::Digest(_) => None,
        }
    }
}

/// Lexically normalise a path so that equivalent spellings share an identity.
///
/// `.` components are dropped and `..` cancels the preceding normal
/// component. Leading `..` components are kept, and `..` directly under the
/// root is dropped. Symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}
