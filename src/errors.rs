// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::action::ActionError;
use crate::resource::ResourceKey;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task '{task}': dependency {dependency} does not exist and could not be made")]
    DependencyUnsatisfiable {
        task: String,
        dependency: ResourceKey,
    },

    #[error("Task '{task}': action failed")]
    Action {
        task: String,
        #[source]
        source: ActionError,
    },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cycle detected while resolving makers: {0}")]
    Cycle(String),

    #[error("Task '{task}': signature of {resource} is not a timestamp")]
    UnorderedSignature {
        task: String,
        resource: ResourceKey,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
