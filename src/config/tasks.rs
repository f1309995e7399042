// src/config/tasks.rs

use std::path::Path;
use std::sync::Arc;

use crate::action::{Action, CmdAction};
use crate::builder::Builder;
use crate::config::model::{ConfigFile, ConfigSection, TaskConfig};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::resource::{Dependency, FileDependency, FileStamper, Target};
use crate::task::{Staleness, Task};

/// Build a [`Task`] from its `[task.<name>]` section.
///
/// Relative paths are resolved against `root`, and commands run with `root`
/// as their working directory.
pub fn build_task(name: &str, cfg: &TaskConfig, section: &ConfigSection, root: &Path) -> Task {
    let stamper = if cfg.hash_deps {
        FileStamper::Hash
    } else {
        FileStamper::Modified
    };

    let dependencies = cfg
        .deps
        .iter()
        .map(|path| Dependency::File(FileDependency::with_stamper(root.join(path), stamper)))
        .chain(cfg.dir_deps.iter().map(|path| Dependency::dir(root.join(path))))
        .collect();

    let targets = cfg
        .targets
        .iter()
        .map(|path| Target::file(root.join(path)))
        .chain(cfg.dir_targets.iter().map(|path| Target::dir(root.join(path))))
        .collect();

    let actions = cfg
        .cmds
        .iter()
        .map(|cmd| Box::new(CmdAction::new(cmd).in_dir(root)) as Box<dyn Action>)
        .collect();

    let staleness = Staleness::from_policy(
        cfg.effective_policy(section.policy),
        section.signature_commit,
    );

    Task::new(name, dependencies, targets, actions).with_policy(staleness)
}

/// Build every task in a validated task file and register them.
pub fn builder_from_config(
    cfg: &ConfigFile,
    root: &Path,
    fs: Arc<dyn FileSystem>,
) -> Result<Builder> {
    let tasks = cfg
        .task
        .iter()
        .map(|(name, task)| build_task(name, task, &cfg.config, root))
        .collect();

    Builder::with_file_system(tasks, fs)
}
