// src/builder/mod.rs

//! Task registry and maker resolution.
//!
//! - [`makers`] indexes every declared target by identity.
//! - [`session`] drives one recursive build and detects cycles.
//! - [`plan`] computes the order a run would visit tasks in, for dry runs.

pub mod makers;
pub mod plan;
pub(crate) mod session;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::errors::{BuildError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::resource::Dependency;
use crate::task::Task;

pub use makers::MakerIndex;

use session::Session;

/// Registry of tasks keyed by name.
///
/// The task set is fixed at construction. Running a task may execute the
/// makers of its dependencies first, recursively.
#[derive(Debug)]
pub struct Builder {
    tasks: BTreeMap<String, Task>,
    makers: MakerIndex,
    fs: Arc<dyn FileSystem>,
}

impl Builder {
    /// Register `tasks` against the real file system.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        Self::with_file_system(tasks, Arc::new(RealFileSystem))
    }

    /// Register `tasks` against the given file system.
    ///
    /// Fails on duplicate task names and on targets declared by more than
    /// one task.
    pub fn with_file_system(tasks: Vec<Task>, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let makers = MakerIndex::build(tasks.iter())?;

        let mut registry = BTreeMap::new();
        for task in tasks {
            let name = task.name().to_string();
            if registry.insert(name.clone(), task).is_some() {
                return Err(BuildError::Config(format!(
                    "task '{}' is declared more than once",
                    name
                )));
            }
        }

        Ok(Self {
            tasks: registry,
            makers,
            fs,
        })
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// The task whose targets satisfy `dep`, if any.
    pub fn get_maker(&self, dep: &Dependency) -> Option<&Task> {
        self.makers
            .maker_of(dep)
            .and_then(|name| self.tasks.get(name))
    }

    /// Bring `name` up to date, running makers first as needed.
    ///
    /// Returns whether `name` itself executed.
    pub fn run(&mut self, name: &str) -> Result<bool> {
        info!(task = %name, "building");
        let executed = self.session().run_task(name)?;
        info!(task = %name, executed, "build finished");
        Ok(executed)
    }

    /// Global up-to-date check of `name`. Never executes actions.
    pub fn uptodate(&mut self, name: &str) -> Result<bool> {
        self.session().uptodate_task(name)
    }

    /// Tasks a run of `name` may visit, in the order it would visit them.
    pub fn plan(&self, name: &str) -> Result<Vec<String>> {
        plan::execution_plan(&self.tasks, &self.makers, name)
    }

    fn session(&mut self) -> Session<'_> {
        Session::new(&mut self.tasks, &self.makers, self.fs.as_ref())
    }
}
