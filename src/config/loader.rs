// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialise a task file.
///
/// No semantic checks happen here, so callers can still adjust the raw file
/// (e.g. apply `--policy`) before validating it.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let raw: RawConfigFile = toml::from_str(&text)?;
    debug!(path = %path.display(), tasks = raw.task.len(), "task file parsed");
    Ok(raw)
}

/// Read, deserialise and validate a task file.
///
/// Rejects task files with no tasks, an unknown `default_task`, targets
/// declared by two tasks, maker cycles, or `hash_deps` under the timestamp
/// policy. Paths are compared after resolving them against the task file's
/// directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    ConfigFile::from_raw(load_from_path(path)?, &config_root_dir(path))
}

/// Directory that relative paths in a task file are resolved against: the
/// file's own directory, or the working directory for a bare file name.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
