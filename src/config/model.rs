// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{Policy, SignatureCommit};

/// Task file exactly as deserialised from TOML, before validation.
///
/// ```toml
/// [config]
/// policy = "timestamp"
/// signature_commit = "on-success"
/// default_task = "task1"
///
/// [task.task1]
/// policy = "signature"
/// deps = ["file2.txt"]
/// targets = ["file1.txt"]
/// cmds = ["wc -l file2.txt > file1.txt"]
///
/// [task.task2]
/// targets = ["file2.txt"]
/// cmds = ["echo 'Hello World!' > file2.txt"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A task file that passed validation.
///
/// Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: BTreeMap<String, TaskConfig>) -> Self {
        Self { config, task }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Policy for tasks that do not set their own; `timestamp` by default.
    #[serde(default)]
    pub policy: Policy,

    /// When the signature policy records observed signatures.
    #[serde(default)]
    pub signature_commit: SignatureCommit,

    /// Task to run when none is named on the command line.
    #[serde(default)]
    pub default_task: Option<String>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Regular files this task reads.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Directories this task reads.
    #[serde(default)]
    pub dir_deps: Vec<String>,

    /// Sign `deps` by content digest instead of modification time.
    #[serde(default)]
    pub hash_deps: bool,

    /// Regular files this task writes.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Directories this task creates.
    #[serde(default)]
    pub dir_targets: Vec<String>,

    /// Shell commands, run in order.
    #[serde(default)]
    pub cmds: Vec<String>,

    /// Per-task policy; falls back to `[config].policy`.
    #[serde(default)]
    pub policy: Option<Policy>,
}

impl TaskConfig {
    pub fn effective_policy(&self, default_policy: Policy) -> Policy {
        self.policy.unwrap_or(default_policy)
    }
}
