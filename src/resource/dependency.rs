// src/resource/dependency.rs

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::fs::FileSystem;
use crate::resource::{ResourceKey, ResourceKind, Signature, compute_file_hash, normalize_path};

/// How a file dependency is turned into a [`Signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStamper {
    /// Last-modified time (the classic make behaviour).
    #[default]
    Modified,
    /// blake3 digest of the contents; touching a file without changing it
    /// does not make dependants stale.
    Hash,
}

/// A regular file a task reads.
#[derive(Debug, Clone)]
pub struct FileDependency {
    path: PathBuf,
    stamper: FileStamper,
}

impl FileDependency {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_stamper(path, FileStamper::Modified)
    }

    pub fn with_stamper(path: impl AsRef<Path>, stamper: FileStamper) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            stamper,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stamper(&self) -> FileStamper {
        self.stamper
    }
}

/// A directory a task reads.
#[derive(Debug, Clone)]
pub struct DirDependency {
    path: PathBuf,
}

impl DirDependency {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An input a task requires to exist, and be current, before it acts.
///
/// Equality and hashing follow [`Dependency::key`] only, so two dependencies
/// on the same path are the same dependency whatever their stamper.
#[derive(Debug, Clone)]
pub enum Dependency {
    File(FileDependency),
    Dir(DirDependency),
}

impl Dependency {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Dependency::File(FileDependency::new(path))
    }

    pub fn hashed_file(path: impl AsRef<Path>) -> Self {
        Dependency::File(FileDependency::with_stamper(path, FileStamper::Hash))
    }

    pub fn dir(path: impl AsRef<Path>) -> Self {
        Dependency::Dir(DirDependency::new(path))
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Dependency::File(_) => ResourceKind::File,
            Dependency::Dir(_) => ResourceKind::Dir,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Dependency::File(dep) => dep.path(),
            Dependency::Dir(dep) => dep.path(),
        }
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            kind: self.kind(),
            path: self.path().to_path_buf(),
        }
    }

    /// Whether the dependency is currently present. Never fails.
    pub fn exists(&self, fs: &dyn FileSystem) -> bool {
        match self {
            Dependency::File(dep) => fs.is_file(dep.path()),
            Dependency::Dir(dep) => fs.is_dir(dep.path()),
        }
    }

    /// Current signature. Only meaningful when [`Dependency::exists`] holds;
    /// otherwise the underlying I/O error is returned.
    pub fn signature(&self, fs: &dyn FileSystem) -> Result<Signature> {
        match self {
            Dependency::File(dep) => match dep.stamper() {
                FileStamper::Modified => modified_signature(fs, dep.path()),
                FileStamper::Hash => {
                    let digest = compute_file_hash(fs, dep.path())
                        .with_context(|| format!("computing signature of {}", self.key()))?;
                    Ok(Signature::Digest(digest))
                }
            },
            Dependency::Dir(dep) => modified_signature(fs, dep.path()),
        }
    }
}

pub(crate) fn modified_signature(fs: &dyn FileSystem, path: &Path) -> Result<Signature> {
    let modified = fs
        .modified(path)
        .with_context(|| format!("computing signature of {:?}", path))?;
    Ok(Signature::Modified(modified))
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.path() == other.path()
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.path().hash(state);
    }
}
