// src/lib.rs

pub mod action;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod resource;
pub mod task;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::builder::Builder;
use crate::cli::CliArgs;
use crate::config::{ConfigFile, builder_from_config, config_root_dir, load_from_path};
use crate::fs::RealFileSystem;
use crate::task::{Staleness, Task};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading (+ `--policy` override) and validation
/// - builder construction against the real file system
/// - `--dry-run`, `--check`, or an actual build of each requested task
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);

    let mut raw = load_from_path(&config_path)
        .with_context(|| format!("loading task file {:?}", config_path))?;
    if let Some(policy) = args.policy {
        raw.config.policy = policy;
    }
    let root = config_root_dir(&config_path);
    let cfg = ConfigFile::from_raw(raw, &root)
        .with_context(|| format!("validating task file {:?}", config_path))?;

    let names = requested_tasks(&args, &cfg)?;
    debug!(root = %root.display(), ?names, "resolved build request");

    let mut builder = builder_from_config(&cfg, &root, Arc::new(RealFileSystem))?;

    if args.dry_run {
        return print_dry_run(&builder, &names);
    }

    if args.check {
        return check(&mut builder, &names);
    }

    for name in &names {
        let executed = builder.run(name)?;
        info!(task = %name, executed, "task done");
    }

    Ok(())
}

/// Tasks named on the command line, or the task file's `default_task`.
fn requested_tasks(args: &CliArgs, cfg: &ConfigFile) -> Result<Vec<String>> {
    if !args.tasks.is_empty() {
        return Ok(args.tasks.clone());
    }

    match &cfg.config.default_task {
        Some(name) => Ok(vec![name.clone()]),
        None => bail!("no task given and no [config].default_task in the task file"),
    }
}

/// Report global up-to-dateness of each task; fail if any is stale.
fn check(builder: &mut Builder, names: &[String]) -> Result<()> {
    let mut stale = Vec::new();

    for name in names {
        if let Some(Staleness::Signature { .. }) = builder.task(name).map(Task::staleness) {
            warn!(task = %name, "signature policy has no record from earlier invocations");
        }

        if builder.uptodate(name)? {
            println!("{name}: up to date");
        } else {
            println!("{name}: out of date");
            stale.push(name.as_str());
        }
    }

    if !stale.is_empty() {
        bail!("out of date: {}", stale.join(", "));
    }

    Ok(())
}

/// Simple dry-run output: the build order and what each task declares.
fn print_dry_run(builder: &Builder, names: &[String]) -> Result<()> {
    println!("makedag dry-run");

    for name in names {
        let plan = builder.plan(name)?;
        println!();
        println!("{name} ({} task(s)):", plan.len());

        for step in &plan {
            let Some(task) = builder.task(step) else {
                continue;
            };
            println!("  - {step} [{:?}]", task.staleness());
            for dep in task.dependencies() {
                println!("      dep: {}", dep.key());
            }
            for target in task.targets() {
                println!("      target: {}", target.key());
            }
            for action in task.actions() {
                println!("      action: {action:?}");
            }
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
