// src/resource/target.rs

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::fs::FileSystem;
use crate::resource::dependency::modified_signature;
use crate::resource::{Dependency, ResourceKey, ResourceKind, Signature, normalize_path};

/// A regular file a task writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A directory a task creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirTarget {
    path: PathBuf,
}

impl DirTarget {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An output a task is responsible for producing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    File(FileTarget),
    Dir(DirTarget),
}

impl Target {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Target::File(FileTarget::new(path))
    }

    pub fn dir(path: impl AsRef<Path>) -> Self {
        Target::Dir(DirTarget::new(path))
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::File(_) => ResourceKind::File,
            Target::Dir(_) => ResourceKind::Dir,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Target::File(target) => target.path(),
            Target::Dir(target) => target.path(),
        }
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            kind: self.kind(),
            path: self.path().to_path_buf(),
        }
    }

    /// Whether this target satisfies `dep`: same kind, same path.
    pub fn makes(&self, dep: &Dependency) -> bool {
        self.kind() == dep.kind() && self.path() == dep.path()
    }

    pub fn exists(&self, fs: &dyn FileSystem) -> bool {
        match self {
            Target::File(target) => fs.is_file(target.path()),
            Target::Dir(target) => fs.is_dir(target.path()),
        }
    }

    /// Last-modified time of the target. Fails if it does not exist.
    pub fn signature(&self, fs: &dyn FileSystem) -> Result<Signature> {
        modified_signature(fs, self.path())
    }
}
