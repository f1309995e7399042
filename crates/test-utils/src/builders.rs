#![allow(dead_code)]

use std::collections::BTreeMap;

use makedag::config::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use makedag::errors::Result;
use makedag::types::{Policy, SignatureCommit};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.config.config.policy = policy;
        self
    }

    pub fn with_signature_commit(mut self, commit: SignatureCommit) -> Self {
        self.config.config.signature_commit = commit;
        self
    }

    pub fn with_default_task(mut self, name: &str) -> Self {
        self.config.config.default_task = Some(name.to_string());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            task: TaskConfig::default(),
        }
    }

    pub fn dep(mut self, path: &str) -> Self {
        self.task.deps.push(path.to_string());
        self
    }

    pub fn dir_dep(mut self, path: &str) -> Self {
        self.task.dir_deps.push(path.to_string());
        self
    }

    pub fn hash_deps(mut self, val: bool) -> Self {
        self.task.hash_deps = val;
        self
    }

    pub fn target(mut self, path: &str) -> Self {
        self.task.targets.push(path.to_string());
        self
    }

    pub fn dir_target(mut self, path: &str) -> Self {
        self.task.dir_targets.push(path.to_string());
        self
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.task.cmds.push(cmd.to_string());
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.task.policy = Some(policy);
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
