// src/config/validate.rs

use std::collections::HashMap;
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile, TaskConfig};
use crate::errors::{BuildError, Result};
use crate::resource::{ResourceKey, ResourceKind};
use crate::types::Policy;

/// Validates with paths taken as written, i.e. relative to the working
/// directory. Prefer [`ConfigFile::from_raw`] when the task file's
/// directory is known.
impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ConfigFile::from_raw(raw, Path::new(""))
    }
}

impl ConfigFile {
    /// Validate `raw` with every path resolved against `root`, the same way
    /// [`build_task`](crate::config::build_task) resolves them.
    pub fn from_raw(raw: RawConfigFile, root: &Path) -> Result<ConfigFile> {
        validate_raw_config(&raw, root)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile, root: &Path) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_default_task(cfg)?;
    validate_policies(cfg)?;
    let makers = validate_targets(cfg, root)?;
    validate_dag(cfg, &makers, root)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(BuildError::Config(
            "task file must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_default_task(cfg: &RawConfigFile) -> Result<()> {
    if let Some(name) = &cfg.config.default_task {
        if !cfg.task.contains_key(name) {
            return Err(BuildError::Config(format!(
                "[config].default_task refers to unknown task '{}'",
                name
            )));
        }
    }
    Ok(())
}

fn validate_policies(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        let policy = task.effective_policy(cfg.config.policy);
        if task.hash_deps && !task.deps.is_empty() && policy == Policy::Timestamp {
            return Err(BuildError::Config(format!(
                "task '{}' uses `hash_deps` with the timestamp policy; content digests cannot be ordered",
                name
            )));
        }
    }
    Ok(())
}

fn target_keys<'a>(
    task: &'a TaskConfig,
    root: &'a Path,
) -> impl Iterator<Item = ResourceKey> + 'a {
    let files = task
        .targets
        .iter()
        .map(move |path| ResourceKey::new(ResourceKind::File, root.join(path)));
    let dirs = task
        .dir_targets
        .iter()
        .map(move |path| ResourceKey::new(ResourceKind::Dir, root.join(path)));
    files.chain(dirs)
}

fn dependency_keys<'a>(
    task: &'a TaskConfig,
    root: &'a Path,
) -> impl Iterator<Item = ResourceKey> + 'a {
    let files = task
        .deps
        .iter()
        .map(move |path| ResourceKey::new(ResourceKind::File, root.join(path)));
    let dirs = task
        .dir_deps
        .iter()
        .map(move |path| ResourceKey::new(ResourceKind::Dir, root.join(path)));
    files.chain(dirs)
}

/// Map every declared target to its task, rejecting targets declared twice.
fn validate_targets<'a>(
    cfg: &'a RawConfigFile,
    root: &Path,
) -> Result<HashMap<ResourceKey, &'a str>> {
    let mut makers: HashMap<ResourceKey, &str> = HashMap::new();

    for (name, task) in cfg.task.iter() {
        for key in target_keys(task, root) {
            match makers.get(&key) {
                Some(existing) if *existing != name.as_str() => {
                    return Err(BuildError::Config(format!(
                        "{} is produced by both task '{}' and task '{}'",
                        key, existing, name
                    )));
                }
                Some(_) => {}
                None => {
                    makers.insert(key, name.as_str());
                }
            }
        }
    }

    Ok(makers)
}

fn validate_dag(
    cfg: &RawConfigFile,
    makers: &HashMap<ResourceKey, &str>,
    root: &Path,
) -> Result<()> {
    // Edge direction: maker -> task
    // For:
    //   [task.B]
    //   deps = ["x"]
    // where task A lists "x" in `targets`, we add edge A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for key in dependency_keys(task, root) {
            if let Some(maker) = makers.get(&key) {
                graph.add_edge(*maker, name.as_str(), ());
            }
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BuildError::Cycle(format!(
            "cycle detected in task file involving task '{}'",
            cycle.node_id()
        ))),
    }
}
