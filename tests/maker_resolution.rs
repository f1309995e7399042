// tests/maker_resolution.rs

mod common;
use crate::common::{ExecutionLog, FakeAction, mock_builder};

use std::error::Error;
use std::sync::Arc;

use makedag::builder::{Builder, MakerIndex};
use makedag::errors::BuildError;
use makedag::fs::mock::MockFileSystem;
use makedag::resource::{Dependency, ResourceKey, ResourceKind, Target};
use makedag::task::Task;

type TestResult = Result<(), Box<dyn Error>>;

fn producer(name: &str, targets: Vec<Target>) -> Task {
    Task::new(name, vec![], targets, vec![])
}

#[test]
fn get_maker_finds_the_task_declaring_the_target() -> TestResult {
    let fs = MockFileSystem::new();
    let builder = mock_builder(
        &fs,
        vec![
            producer("gen_a", vec![Target::file("a.txt")]),
            producer("gen_b", vec![Target::file("b.txt"), Target::dir("b_out")]),
        ],
    );

    assert_eq!(builder.task_names().collect::<Vec<_>>(), vec!["gen_a", "gen_b"]);

    let maker = builder.get_maker(&Dependency::file("b.txt"));
    assert_eq!(maker.map(Task::name), Some("gen_b"));
    assert!(maker.is_some_and(|task| task.makes(&Dependency::file("b.txt"))));
    assert!(maker.is_some_and(|task| !task.makes(&Dependency::file("a.txt"))));

    let maker = builder.get_maker(&Dependency::dir("b_out"));
    assert_eq!(maker.map(Task::name), Some("gen_b"));

    assert!(builder.get_maker(&Dependency::file("c.txt")).is_none());

    Ok(())
}

#[test]
fn file_dependency_never_matches_dir_target() -> TestResult {
    let fs = MockFileSystem::new();
    let builder = mock_builder(&fs, vec![producer("mkdir", vec![Target::dir("out")])]);

    assert!(builder.get_maker(&Dependency::file("out")).is_none());
    assert!(builder.get_maker(&Dependency::dir("out")).is_some());

    let target = Target::dir("out");
    assert!(!target.makes(&Dependency::file("out")));
    assert!(target.makes(&Dependency::dir("out")));

    Ok(())
}

#[test]
fn paths_are_compared_after_normalization() -> TestResult {
    let fs = MockFileSystem::new();
    let builder = mock_builder(&fs, vec![producer("gen", vec![Target::file("x.txt")])]);

    let maker = builder.get_maker(&Dependency::file("./out/../x.txt"));
    assert_eq!(maker.map(Task::name), Some("gen"));

    assert_eq!(
        ResourceKey::new(ResourceKind::File, "a/./b/../c"),
        ResourceKey::new(ResourceKind::File, "a/c")
    );

    Ok(())
}

#[test]
fn hashed_and_plain_file_dependencies_share_an_identity() -> TestResult {
    let fs = MockFileSystem::new();
    let builder = mock_builder(&fs, vec![producer("gen", vec![Target::file("x.txt")])]);

    assert_eq!(Dependency::hashed_file("x.txt"), Dependency::file("x.txt"));
    assert!(builder.get_maker(&Dependency::hashed_file("x.txt")).is_some());

    Ok(())
}

#[test]
fn two_tasks_declaring_the_same_target_is_rejected() -> TestResult {
    let result = Builder::with_file_system(
        vec![
            producer("first", vec![Target::file("shared.txt")]),
            producer("second", vec![Target::file("./shared.txt")]),
        ],
        Arc::new(MockFileSystem::new()),
    );

    match result {
        Err(BuildError::Config(msg)) => {
            assert!(msg.contains("first"), "unexpected message: {msg}");
            assert!(msg.contains("second"), "unexpected message: {msg}");
        }
        other => panic!("Expected Config error, got: {:?}", other),
    }

    Ok(())
}

#[test]
fn same_path_as_file_and_dir_target_is_not_ambiguous() -> TestResult {
    let index = MakerIndex::build(&[
        producer("file_maker", vec![Target::file("out")]),
        producer("dir_maker", vec![Target::dir("out")]),
    ])?;

    assert_eq!(index.len(), 2);
    assert!(!index.is_empty());
    assert!(MakerIndex::build(&[producer("sink", vec![])])?.is_empty());
    assert_eq!(index.maker_of(&Dependency::file("out")), Some("file_maker"));
    assert_eq!(index.maker_of(&Dependency::dir("out")), Some("dir_maker"));

    Ok(())
}

#[test]
fn duplicate_task_names_are_rejected() -> TestResult {
    let result = Builder::with_file_system(
        vec![
            producer("dup", vec![Target::file("a")]),
            producer("dup", vec![Target::file("b")]),
        ],
        Arc::new(MockFileSystem::new()),
    );

    assert!(matches!(result, Err(BuildError::Config(_))));

    Ok(())
}

#[test]
fn shared_maker_runs_once_per_build() -> TestResult {
    let fs = MockFileSystem::new();
    let log = ExecutionLog::new();

    let gen_task = Task::new(
        "gen",
        vec![],
        vec![Target::file("common.h")],
        vec![FakeAction::new("gen", &fs, &log).writes("common.h", "h").boxed()],
    );
    let obj_a = Task::new(
        "obj_a",
        vec![Dependency::file("common.h")],
        vec![Target::file("a.o")],
        vec![FakeAction::new("obj_a", &fs, &log).writes("a.o", "a").boxed()],
    );
    let obj_b = Task::new(
        "obj_b",
        vec![Dependency::file("common.h")],
        vec![Target::file("b.o")],
        vec![FakeAction::new("obj_b", &fs, &log).writes("b.o", "b").boxed()],
    );
    let link = Task::new(
        "link",
        vec![Dependency::file("a.o"), Dependency::file("b.o")],
        vec![Target::file("app")],
        vec![FakeAction::new("link", &fs, &log).writes("app", "bin").boxed()],
    );

    let mut builder = mock_builder(&fs, vec![link, obj_b, obj_a, gen_task]);

    assert!(builder.run("link")?);
    assert_eq!(log.entries(), vec!["gen", "obj_a", "obj_b", "link"]);
    assert_eq!(builder.plan("link")?, vec!["gen", "obj_a", "obj_b", "link"]);

    Ok(())
}
