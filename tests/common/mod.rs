#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use makedag::builder::Builder;
use makedag::fs::mock::MockFileSystem;
use makedag::task::Task;

pub use makedag_test_utils::builders;
pub use makedag_test_utils::fake_action::{ExecutionLog, FakeAction};
pub use makedag_test_utils::init_tracing;

/// A point on the mock clock, `secs` seconds after the epoch.
pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Register `tasks` against a shared mock file system.
pub fn mock_builder(fs: &MockFileSystem, tasks: Vec<Task>) -> Builder {
    Builder::with_file_system(tasks, Arc::new(fs.clone())).expect("valid task set")
}
