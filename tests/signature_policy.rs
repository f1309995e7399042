// tests/signature_policy.rs

mod common;
use crate::common::{ExecutionLog, FakeAction, init_tracing};

use std::error::Error;

use makedag::fs::mock::MockFileSystem;
use makedag::resource::{Dependency, Signature, Target};
use makedag::task::{LeafResolver, Staleness, Task};
use makedag::types::SignatureCommit;

type TestResult = Result<(), Box<dyn Error>>;

fn derive_task(fs: &MockFileSystem, log: &ExecutionLog, commit: SignatureCommit) -> Task {
    Task::new(
        "derive",
        vec![Dependency::file("in")],
        vec![Target::file("out")],
        vec![FakeAction::new("derive", fs, log).writes("out", "derived").boxed()],
    )
    .with_policy(Staleness::Signature { commit })
}

#[test]
fn without_dependencies_only_targets_matter() -> TestResult {
    let fs = MockFileSystem::new();
    let mut task = Task::new("t", vec![], vec![Target::file("a"), Target::file("b")], vec![]);

    assert!(!task.local_uptodate(&fs)?);
    fs.add_file("a", "");
    assert!(!task.local_uptodate(&fs)?);
    fs.add_file("b", "");
    assert!(task.local_uptodate(&fs)?);

    Ok(())
}

#[test]
fn second_run_without_changes_does_not_execute() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    let mut task = derive_task(&fs, &log, SignatureCommit::OnSuccess);

    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert!(!task.run(&mut LeafResolver::new(&fs))?);
    assert_eq!(log.count("derive"), 1);

    Ok(())
}

#[test]
fn deleted_target_triggers_rebuild() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    let mut task = derive_task(&fs, &log, SignatureCommit::OnSuccess);

    task.run(&mut LeafResolver::new(&fs))?;
    fs.remove("out");
    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert_eq!(log.count("derive"), 2);

    Ok(())
}

#[test]
fn on_success_check_is_pure_and_does_not_mask_staleness() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    let mut task = derive_task(&fs, &log, SignatureCommit::OnSuccess);

    assert!(!task.local_uptodate(&fs)?);
    assert!(!task.local_uptodate(&fs)?);
    assert!(task.recorded_signature(&Dependency::file("in")).is_none());

    task.run(&mut LeafResolver::new(&fs))?;
    let recorded = task.recorded_signature(&Dependency::file("in")).cloned();
    assert!(matches!(recorded, Some(Signature::Modified(_))));

    fs.touch("in")?;
    assert!(!task.local_uptodate(&fs)?);
    assert!(!task.local_uptodate(&fs)?);
    assert_eq!(
        task.recorded_signature(&Dependency::file("in")).cloned(),
        recorded
    );

    Ok(())
}

#[test]
fn on_check_records_while_checking() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    fs.add_file("out", "stale but present");
    let mut task = derive_task(&fs, &log, SignatureCommit::OnCheck);

    // First sight of the dependency: stale, but its signature is now cached,
    // so an immediate second check reports up to date.
    assert!(!task.local_uptodate(&fs)?);
    assert!(task.recorded_signature(&Dependency::file("in")).is_some());
    assert!(task.local_uptodate(&fs)?);
    assert!(log.entries().is_empty());

    Ok(())
}

#[test]
fn on_check_still_rebuilds_within_a_single_run() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    let mut task = derive_task(&fs, &log, SignatureCommit::OnCheck);

    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert!(!task.run(&mut LeafResolver::new(&fs))?);

    fs.touch("in")?;
    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert_eq!(log.count("derive"), 2);

    Ok(())
}

#[test]
fn failed_execution_leaves_cache_untouched() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "v1");
    let mut task = Task::new(
        "derive",
        vec![Dependency::file("in")],
        vec![Target::file("out")],
        vec![FakeAction::new("derive", &fs, &log).failing().boxed()],
    );

    assert!(task.run(&mut LeafResolver::new(&fs)).is_err());
    assert!(task.recorded_signature(&Dependency::file("in")).is_none());
    assert!(task.run(&mut LeafResolver::new(&fs)).is_err());
    assert_eq!(log.count("derive"), 2);

    Ok(())
}

#[test]
fn every_dependency_is_observed_even_after_the_first_change() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("a", "1");
    fs.add_file("b", "1");
    let mut task = Task::new(
        "both",
        vec![Dependency::file("a"), Dependency::file("b")],
        vec![Target::file("out")],
        vec![FakeAction::new("both", &fs, &log).writes("out", "x").boxed()],
    );

    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert!(task.recorded_signature(&Dependency::file("a")).is_some());
    assert!(task.recorded_signature(&Dependency::file("b")).is_some());

    Ok(())
}

#[test]
fn hash_stamper_ignores_touches_but_sees_content_changes() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();
    fs.add_file("in", "hello");
    let mut task = Task::new(
        "derive",
        vec![Dependency::hashed_file("in")],
        vec![Target::file("out")],
        vec![FakeAction::new("derive", &fs, &log).writes("out", "x").boxed()],
    );

    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert!(matches!(
        task.recorded_signature(&Dependency::file("in")),
        Some(Signature::Digest(_))
    ));

    fs.touch("in")?;
    assert!(!task.run(&mut LeafResolver::new(&fs))?);

    fs.add_file("in", "changed");
    assert!(task.run(&mut LeafResolver::new(&fs))?);
    assert_eq!(log.count("derive"), 2);

    Ok(())
}
