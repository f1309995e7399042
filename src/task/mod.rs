// src/task/mod.rs

//! The build graph node.
//!
//! A [`Task`] owns ordered dependencies, targets and actions, plus a private
//! cache of the dependency signatures it last saw while up to date. It does
//! not know about other tasks: whoever drives it passes a [`Resolver`] that
//! can find and run the maker of a dependency.
//!
//! - [`staleness`] holds the two local up-to-date policies.
//! - [`resolver`] defines the interface a task uses to reach its makers.

pub mod resolver;
pub mod staleness;

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use tracing::{debug, info};

use crate::action::Action;
use crate::errors::{BuildError, Result};
use crate::fs::FileSystem;
use crate::resource::{Dependency, ResourceKey, Signature, Target};
use crate::types::SignatureCommit;

pub use resolver::{LeafResolver, Resolver};
pub use staleness::Staleness;

/// A named unit of build work.
///
/// Equality and hashing use the name only.
#[derive(Debug)]
pub struct Task {
    name: String,
    dependencies: Vec<Dependency>,
    targets: Vec<Target>,
    actions: Vec<Box<dyn Action>>,
    staleness: Staleness,
    /// Last signature seen for each dependency while the task was current.
    signatures: BTreeMap<ResourceKey, Signature>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        dependencies: Vec<Dependency>,
        targets: Vec<Target>,
        actions: Vec<Box<dyn Action>>,
    ) -> Self {
        Self {
            name: name.into(),
            dependencies,
            targets,
            actions,
            staleness: Staleness::default(),
            signatures: BTreeMap::new(),
        }
    }

    pub fn with_policy(mut self, staleness: Staleness) -> Self {
        self.staleness = staleness;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    pub fn staleness(&self) -> Staleness {
        self.staleness
    }

    /// Whether one of this task's targets satisfies `dep`.
    pub fn makes(&self, dep: &Dependency) -> bool {
        self.targets.iter().any(|target| target.makes(dep))
    }

    /// The cached signature for `dep`, if one has been recorded.
    pub fn recorded_signature(&self, dep: &Dependency) -> Option<&Signature> {
        self.signatures.get(&dep.key())
    }

    pub fn all_targets_exist(&self, fs: &dyn FileSystem) -> bool {
        self.targets.iter().all(|target| target.exists(fs))
    }

    /// Run every action in declared order, stopping at the first failure.
    ///
    /// No staleness check, no recursion.
    pub fn exec(&mut self) -> Result<()> {
        info!(task = %self.name, actions = self.actions.len(), "executing task");

        for action in self.actions.iter_mut() {
            debug!(task = %self.name, ?action, "running action");
            action.run().map_err(|source| BuildError::Action {
                task: self.name.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Bring this task up to date.
    ///
    /// Every dependency is first handed to the resolver so its maker (if
    /// any) can run, then must exist. Afterwards the task executes if it is
    /// locally out of date. Returns whether this task's actions ran.
    pub fn run(&mut self, resolver: &mut dyn Resolver) -> Result<bool> {
        debug!(task = %self.name, "run");

        for dep in &self.dependencies {
            if let Some(executed) = resolver.run_maker(dep)? {
                debug!(
                    task = %self.name,
                    dependency = %dep.key(),
                    maker_executed = executed,
                    "maker finished"
                );
            }

            if !dep.exists(resolver.file_system()) {
                return Err(BuildError::DependencyUnsatisfiable {
                    task: self.name.clone(),
                    dependency: dep.key(),
                });
            }
        }

        let fs = resolver.file_system();
        let pending = match self.staleness {
            Staleness::Signature {
                commit: SignatureCommit::OnSuccess,
            } => {
                let check = self.check_signatures(fs)?;
                (!check.uptodate).then_some(check.observed)
            }
            _ => (!self.local_uptodate(fs)?).then(Vec::new),
        };

        let Some(observed) = pending else {
            info!(task = %self.name, "up to date; not executing");
            return Ok(false);
        };

        self.exec()?;
        self.record_signatures(observed);
        Ok(true)
    }

    /// Whether this task and every maker below it are up to date.
    ///
    /// Never executes actions. Dependencies without a maker are leaves whose
    /// state is already covered by the local check.
    pub fn uptodate(&mut self, resolver: &mut dyn Resolver) -> Result<bool> {
        if !self.local_uptodate(resolver.file_system())? {
            debug!(task = %self.name, "locally out of date");
            return Ok(false);
        }

        for dep in &self.dependencies {
            if let Some(false) = resolver.maker_uptodate(dep)? {
                debug!(
                    task = %self.name,
                    dependency = %dep.key(),
                    "maker out of date"
                );
                return Ok(false);
            }
        }

        debug!(task = %self.name, "up to date, including makers");
        Ok(true)
    }

    /// Whether this task needs re-execution, ignoring its makers.
    ///
    /// Under [`SignatureCommit::OnCheck`] this records every signature it
    /// observes; otherwise it does not touch the cache.
    pub fn local_uptodate(&mut self, fs: &dyn FileSystem) -> Result<bool> {
        match self.staleness {
            Staleness::Timestamp => self.timestamps_uptodate(fs),
            Staleness::Signature { commit } => {
                let check = self.check_signatures(fs)?;
                if commit == SignatureCommit::OnCheck {
                    self.record_signatures(check.observed);
                }
                Ok(check.uptodate)
            }
        }
    }

    fn record_signatures(&mut self, observed: Vec<(ResourceKey, Signature)>) {
        for (key, signature) in observed {
            self.signatures.insert(key, signature);
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
