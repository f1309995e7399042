// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::Policy;

/// Command-line arguments for `makedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "makedag",
    version,
    about = "Rebuild tasks whose targets are stale, making their dependencies first.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to build, in order.
    ///
    /// If omitted, `[config].default_task` from the task file is used.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Path to the task file (TOML).
    ///
    /// Default: `Makedag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Makedag.toml")]
    pub config: String,

    /// Override `[config].policy` ("signature" or "timestamp") for tasks
    /// that don't set their own.
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<Policy>,

    /// Report whether each task is up to date, without executing anything.
    ///
    /// Exits with an error if any task is out of date.
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Parse + validate, print the build order, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MAKEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
