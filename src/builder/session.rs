// src/builder/session.rs

//! One build invocation over a builder's registry.
//!
//! The session is the [`Resolver`] handed to tasks. It owns the active
//! resolution path: a task is taken out of the registry while it runs and
//! its name stays on the path until it returns, so re-entering it through
//! a chain of makers is reported as a cycle instead of recursing forever.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{BuildError, Result};
use crate::fs::FileSystem;
use crate::resource::Dependency;
use crate::task::{Resolver, Task};

use super::makers::MakerIndex;

pub(crate) struct Session<'a> {
    tasks: &'a mut BTreeMap<String, Task>,
    makers: &'a MakerIndex,
    fs: &'a dyn FileSystem,
    active: Vec<String>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        tasks: &'a mut BTreeMap<String, Task>,
        makers: &'a MakerIndex,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            tasks,
            makers,
            fs,
            active: Vec::new(),
        }
    }

    pub(crate) fn run_task(&mut self, name: &str) -> Result<bool> {
        self.with_task(name, |task, session| task.run(session))
    }

    pub(crate) fn uptodate_task(&mut self, name: &str) -> Result<bool> {
        self.with_task(name, |task, session| task.uptodate(session))
    }

    /// Take `name` out of the registry, run `f` on it with `name` on the
    /// active path, and put it back whatever the outcome.
    fn with_task<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Task, &mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.active.iter().any(|active| active == name) {
            let mut path = self.active.clone();
            path.push(name.to_string());
            return Err(BuildError::Cycle(path.join(" -> ")));
        }

        let mut task = self
            .tasks
            .remove(name)
            .ok_or_else(|| BuildError::TaskNotFound(name.to_string()))?;

        self.active.push(name.to_string());
        let result = f(&mut task, self);
        self.active.pop();
        self.tasks.insert(name.to_string(), task);

        result
    }

    fn maker_name(&self, dep: &Dependency) -> Option<String> {
        let maker = self.makers.maker_of(dep)?;
        debug!(dependency = %dep.key(), maker = %maker, "found maker");
        Some(maker.to_string())
    }
}

impl Resolver for Session<'_> {
    fn file_system(&self) -> &dyn FileSystem {
        self.fs
    }

    fn run_maker(&mut self, dep: &Dependency) -> Result<Option<bool>> {
        match self.maker_name(dep) {
            Some(maker) => self.run_task(&maker).map(Some),
            None => Ok(None),
        }
    }

    fn maker_uptodate(&mut self, dep: &Dependency) -> Result<Option<bool>> {
        match self.maker_name(dep) {
            Some(maker) => self.uptodate_task(&maker).map(Some),
            None => Ok(None),
        }
    }
}
