// tests/end_to_end.rs

#![cfg(unix)]

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use makedag::cli::CliArgs;
use makedag::config::{builder_from_config, load_and_validate};
use makedag::errors::BuildError;
use makedag::fs::RealFileSystem;
use makedag::types::Policy;

type TestResult = Result<(), Box<dyn Error>>;

const EXAMPLE: &str = r#"
[config]
default_task = "task1"

[task.task1]
deps = ["file2.txt"]
targets = ["file1.txt"]
cmds = ["wc -l file2.txt > file1.txt"]

[task.task2]
targets = ["file2.txt"]
cmds = ["echo 'Hello World!' > file2.txt"]
"#;

fn write_task_file(dir: &Path, contents: &str) -> std::io::Result<String> {
    let path = dir.join("Makedag.toml");
    fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

fn args(config: String) -> CliArgs {
    CliArgs {
        tasks: Vec::new(),
        config,
        policy: None,
        check: false,
        dry_run: false,
        log_level: None,
    }
}

fn set_age(path: &Path, secs_ago: u64) -> std::io::Result<()> {
    let time = SystemTime::now() - Duration::from_secs(secs_ago);
    File::options().write(true).open(path)?.set_modified(time)
}

#[test]
fn example_builds_maker_first_then_is_idempotent() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let signature = EXAMPLE.replace("[config]\n", "[config]\npolicy = \"signature\"\n");
    let config = write_task_file(dir.path(), &signature)?;

    let cfg = load_and_validate(&config)?;
    let mut builder = builder_from_config(&cfg, dir.path(), Arc::new(RealFileSystem))?;

    assert!(builder.run("task1")?);
    assert_eq!(
        fs::read_to_string(dir.path().join("file2.txt"))?,
        "Hello World!\n"
    );
    let counted = fs::read_to_string(dir.path().join("file1.txt"))?;
    assert_eq!(counted.split_whitespace().next(), Some("1"));

    assert!(!builder.run("task1")?);
    assert!(!builder.run("task2")?);
    assert!(builder.uptodate("task1")?);

    Ok(())
}

#[test]
fn failing_command_surfaces_as_action_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_task_file(
        dir.path(),
        r#"
[task.broken]
targets = ["never.txt"]
cmds = ["echo before", "exit 7", "touch never.txt"]
"#,
    )?;

    let cfg = load_and_validate(&config)?;
    let mut builder = builder_from_config(&cfg, dir.path(), Arc::new(RealFileSystem))?;

    match builder.run("broken") {
        Err(BuildError::Action { task, .. }) => assert_eq!(task, "broken"),
        other => panic!("Expected Action error, got: {:?}", other),
    }
    assert!(!dir.path().join("never.txt").exists());

    Ok(())
}

#[test]
fn repeated_cli_invocations_execute_nothing_by_default() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let config = write_task_file(dir.path(), EXAMPLE)?;
    let file1 = dir.path().join("file1.txt");
    let file2 = dir.path().join("file2.txt");

    makedag::run(args(config.clone()))?;
    assert!(file1.exists());
    assert!(file2.exists());

    // Make the order unambiguous regardless of file system resolution.
    set_age(&file2, 100)?;
    set_age(&file1, 50)?;
    let file1_before = fs::metadata(&file1)?.modified()?;
    let file2_before = fs::metadata(&file2)?.modified()?;

    for _ in 0..2 {
        makedag::run(args(config.clone()))?;
    }
    assert_eq!(fs::metadata(&file1)?.modified()?, file1_before);
    assert_eq!(fs::metadata(&file2)?.modified()?, file2_before);

    let mut check = args(config);
    check.check = true;
    makedag::run(check)?;

    Ok(())
}

#[test]
fn signature_override_cannot_see_earlier_invocations() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_task_file(dir.path(), EXAMPLE)?;

    makedag::run(args(config.clone()))?;

    let mut check = args(config);
    check.policy = Some(Policy::Signature);
    check.check = true;
    assert!(makedag::run(check).is_err());

    Ok(())
}

#[test]
fn cli_check_reports_staleness_without_executing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_task_file(dir.path(), EXAMPLE)?;
    let file1 = dir.path().join("file1.txt");
    let file2 = dir.path().join("file2.txt");

    let mut check = args(config.clone());
    check.check = true;

    assert!(makedag::run(check.clone()).is_err());
    assert!(!file1.exists());
    assert!(!file2.exists());

    makedag::run(args(config))?;
    set_age(&file2, 100)?;
    set_age(&file1, 50)?;

    makedag::run(check.clone())?;

    set_age(&file2, 10)?;
    assert!(makedag::run(check).is_err());

    Ok(())
}

#[test]
fn cli_dry_run_executes_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_task_file(dir.path(), EXAMPLE)?;

    let mut dry = args(config);
    dry.tasks = vec!["task1".to_string()];
    dry.dry_run = true;

    makedag::run(dry)?;
    assert!(!dir.path().join("file1.txt").exists());
    assert!(!dir.path().join("file2.txt").exists());

    Ok(())
}

#[test]
fn cli_without_task_or_default_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_task_file(
        dir.path(),
        r#"
[task.only]
targets = ["out.txt"]
cmds = ["touch out.txt"]
"#,
    )?;

    let err = makedag::run(args(config)).unwrap_err();
    assert!(err.to_string().contains("default_task"));
    assert!(!dir.path().join("out.txt").exists());

    Ok(())
}
