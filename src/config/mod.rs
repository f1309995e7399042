// src/config/mod.rs

//! Task file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a task file from disk (`loader.rs`).
//! - Validate invariants like unambiguous makers and acyclicity (`validate.rs`).
//! - Turn a validated file into tasks and a builder (`tasks.rs`).

pub mod loader;
pub mod model;
pub mod tasks;
pub mod validate;

pub use loader::{config_root_dir, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
pub use tasks::{build_task, builder_from_config};
