// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::resource::normalize_path;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { contents: Vec<u8>, modified: SystemTime },
    Dir { modified: SystemTime },
}

impl MockEntry {
    fn modified(&self) -> SystemTime {
        match self {
            MockEntry::File { modified, .. } | MockEntry::Dir { modified } => *modified,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    /// Logical clock in seconds since the epoch; every write ticks it.
    clock: u64,
}

impl MockState {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        UNIX_EPOCH + Duration::from_secs(self.clock)
    }
}

/// In-memory file system with a logical clock.
///
/// Each write stamps the entry with a strictly later modification time than
/// any previous write, so "written after" always means "newer".
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a file. Returns the modification time it was given.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> SystemTime {
        let mut state = self.state.lock().unwrap();
        let modified = state.tick();
        state.entries.insert(
            normalize_path(path.as_ref()),
            MockEntry::File {
                contents: contents.into(),
                modified,
            },
        );
        modified
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) -> SystemTime {
        let mut state = self.state.lock().unwrap();
        let modified = state.tick();
        state
            .entries
            .insert(normalize_path(path.as_ref()), MockEntry::Dir { modified });
        modified
    }

    /// Override the modification time of an existing entry.
    pub fn set_modified(&self, path: impl AsRef<Path>, time: SystemTime) -> Result<()> {
        let path = normalize_path(path.as_ref());
        let mut state = self.state.lock().unwrap();
        match state.entries.get_mut(&path) {
            Some(MockEntry::File { modified, .. }) | Some(MockEntry::Dir { modified }) => {
                *modified = time;
                Ok(())
            }
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    /// Bump the modification time of an existing entry without changing it.
    pub fn touch(&self, path: impl AsRef<Path>) -> Result<SystemTime> {
        let now = self.state.lock().unwrap().tick();
        self.set_modified(path, now)?;
        Ok(now)
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let mut state = self.state.lock().unwrap();
        state.entries.remove(&normalize_path(path.as_ref())).is_some()
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(&normalize_path(path.as_ref())) {
            Some(MockEntry::File { contents, .. }) => Some(contents.clone()),
            _ => None,
        }
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        matches!(
            state.entries.get(&normalize_path(path)),
            Some(MockEntry::File { .. })
        )
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        matches!(
            state.entries.get(&normalize_path(path)),
            Some(MockEntry::Dir { .. })
        )
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let state = self.state.lock().unwrap();
        state
            .entries
            .get(&normalize_path(path))
            .map(MockEntry::modified)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(&normalize_path(path)) {
            Some(MockEntry::File { contents, .. }) => Ok(Box::new(Cursor::new(contents.clone()))),
            Some(MockEntry::Dir { .. }) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }
}
