// src/task/staleness.rs

//! Local up-to-date policies.

use std::time::SystemTime;

use tracing::debug;

use crate::errors::{BuildError, Result};
use crate::fs::FileSystem;
use crate::resource::{ResourceKey, Signature};
use crate::types::{Policy, SignatureCommit};

use super::Task;

/// How a task decides, on its own, whether it must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Out of date when a dependency's signature differs from the recorded
    /// one, has never been recorded, or a target is missing.
    Signature { commit: SignatureCommit },
    /// Out of date when a target is missing or a dependency is at least as
    /// new as the oldest target. Ignores the signature cache.
    Timestamp,
}

impl Default for Staleness {
    fn default() -> Self {
        Staleness::Signature {
            commit: SignatureCommit::default(),
        }
    }
}

impl Staleness {
    pub fn from_policy(policy: Policy, commit: SignatureCommit) -> Self {
        match policy {
            Policy::Signature => Staleness::Signature { commit },
            Policy::Timestamp => Staleness::Timestamp,
        }
    }
}

/// Outcome of comparing current dependency signatures with the cache.
pub(crate) struct SignatureCheck {
    pub uptodate: bool,
    /// Signatures observed for every dependency that exists.
    pub observed: Vec<(ResourceKey, Signature)>,
}

impl Task {
    /// Compare every dependency against the cache without modifying it.
    ///
    /// All dependencies are visited even after the verdict is known, so
    /// `observed` is complete.
    pub(crate) fn check_signatures(&self, fs: &dyn FileSystem) -> Result<SignatureCheck> {
        let mut uptodate = true;
        let mut observed = Vec::with_capacity(self.dependencies.len());

        for dep in &self.dependencies {
            let key = dep.key();

            if !dep.exists(fs) {
                debug!(task = %self.name, dependency = %key, "dependency missing");
                uptodate = false;
                continue;
            }

            let current = dep.signature(fs)?;
            match self.signatures.get(&key) {
                None => {
                    debug!(task = %self.name, dependency = %key, "no recorded signature");
                    uptodate = false;
                }
                Some(previous) if *previous != current => {
                    debug!(task = %self.name, dependency = %key, "signature changed");
                    uptodate = false;
                }
                Some(_) => {
                    debug!(task = %self.name, dependency = %key, "signature unchanged");
                }
            }

            observed.push((key, current));
        }

        if uptodate && !self.all_targets_exist(fs) {
            debug!(task = %self.name, "a target is missing");
            uptodate = false;
        }

        Ok(SignatureCheck { uptodate, observed })
    }

    pub(crate) fn timestamps_uptodate(&self, fs: &dyn FileSystem) -> Result<bool> {
        if !self.all_targets_exist(fs) {
            debug!(task = %self.name, "a target is missing");
            return Ok(false);
        }

        if self.dependencies.is_empty() {
            return Ok(true);
        }

        let mut newest_dep: Option<SystemTime> = None;
        for dep in &self.dependencies {
            if !dep.exists(fs) {
                debug!(task = %self.name, dependency = %dep.key(), "dependency missing");
                return Ok(false);
            }
            let time = self.timestamp_of(dep.key(), dep.signature(fs)?)?;
            newest_dep = newest_dep.max(Some(time));
        }

        let mut oldest_target: Option<SystemTime> = None;
        for target in &self.targets {
            let time = self.timestamp_of(target.key(), target.signature(fs)?)?;
            oldest_target = Some(oldest_target.map_or(time, |oldest| oldest.min(time)));
        }

        // Dependencies but nothing to compare them against: always rebuild.
        let (Some(newest), Some(oldest)) = (newest_dep, oldest_target) else {
            debug!(task = %self.name, "no targets to compare against");
            return Ok(false);
        };

        if newest >= oldest {
            debug!(task = %self.name, "a dependency is newer than a target");
            return Ok(false);
        }

        Ok(true)
    }

    fn timestamp_of(&self, key: ResourceKey, signature: Signature) -> Result<SystemTime> {
        signature
            .as_modified()
            .ok_or_else(|| BuildError::UnorderedSignature {
                task: self.name.clone(),
                resource: key,
            })
    }
}
