// src/fs/mod.rs

//! File system boundary.
//!
//! Dependencies and targets never touch `std::fs` directly; they go through a
//! [`FileSystem`] so that staleness checks can be exercised against the
//! in-memory [`mock::MockFileSystem`] with a deterministic clock.

use std::fmt::Debug;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Whether a regular file exists at `path`. Never fails.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether a directory exists at `path`. Never fails.
    fn is_dir(&self, path: &Path) -> bool;

    /// Last-modified time of `path`.
    fn modified(&self, path: &Path) -> Result<SystemTime>;

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let meta = fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        meta.modified()
            .with_context(|| format!("reading modification time of {:?}", path))
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let file = fs::File::open(path).with_context(|| format!("opening file {:?}", path))?;
        Ok(Box::new(file))
    }
}
