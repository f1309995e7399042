// src/builder/makers.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{BuildError, Result};
use crate::resource::{Dependency, ResourceKey};
use crate::task::Task;

/// Lookup from target identity to the name of the task producing it.
///
/// Built once when a [`Builder`](super::Builder) is constructed, which is
/// also where ambiguous producers are rejected.
#[derive(Debug, Clone, Default)]
pub struct MakerIndex {
    makers: HashMap<ResourceKey, String>,
}

impl MakerIndex {
    /// Index the targets of `tasks`.
    ///
    /// Fails if two different tasks declare a target with the same identity.
    pub fn build<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Result<Self> {
        let mut makers: HashMap<ResourceKey, String> = HashMap::new();

        for task in tasks {
            for target in task.targets() {
                let key = target.key();
                match makers.get(&key) {
                    Some(existing) if existing != task.name() => {
                        return Err(BuildError::Config(format!(
                            "{} is produced by both task '{}' and task '{}'",
                            key,
                            existing,
                            task.name()
                        )));
                    }
                    Some(_) => {}
                    None => {
                        debug!(target = %key, task = %task.name(), "indexed maker");
                        makers.insert(key, task.name().to_string());
                    }
                }
            }
        }

        Ok(Self { makers })
    }

    /// Name of the task whose targets satisfy `dep`, if any.
    pub fn maker_of(&self, dep: &Dependency) -> Option<&str> {
        self.makers.get(&dep.key()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.makers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.makers.is_empty()
    }
}
