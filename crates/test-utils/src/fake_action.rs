use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use makedag::action::{Action, ActionError};
use makedag::fs::mock::MockFileSystem;

/// Shared record of which fake actions ran, in order.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: &str) {
        self.entries.lock().unwrap().push(label.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.as_str() == label)
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// An action that doesn't spawn processes:
/// - records its label in an [`ExecutionLog`]
/// - writes files / creates directories in a [`MockFileSystem`]
/// - optionally fails instead.
#[derive(Debug, Clone)]
pub struct FakeAction {
    label: String,
    fs: MockFileSystem,
    log: ExecutionLog,
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
    fail: bool,
}

impl FakeAction {
    pub fn new(label: &str, fs: &MockFileSystem, log: &ExecutionLog) -> Self {
        Self {
            label: label.to_string(),
            fs: fs.clone(),
            log: log.clone(),
            files: Vec::new(),
            dirs: Vec::new(),
            fail: false,
        }
    }

    pub fn writes(mut self, path: &str, contents: &str) -> Self {
        self.files.push((PathBuf::from(path), contents.as_bytes().to_vec()));
        self
    }

    pub fn creates_dir(mut self, path: &str) -> Self {
        self.dirs.push(PathBuf::from(path));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn boxed(self) -> Box<dyn Action> {
        Box::new(self)
    }
}

impl Action for FakeAction {
    fn run(&mut self) -> Result<(), ActionError> {
        self.log.push(&self.label);

        if self.fail {
            return Err(ActionError::Other(format!("{} failed", self.label)));
        }

        for dir in &self.dirs {
            self.fs.add_dir(dir);
        }
        for (path, contents) in &self.files {
            self.fs.add_file(path, contents.clone());
        }

        Ok(())
    }
}
